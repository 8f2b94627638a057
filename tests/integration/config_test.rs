//! Configuration loading tests
//!
//! These mutate the process environment, so they run serially.

use std::io::Write;
use std::time::Duration;

use assert_matches::assert_matches;
use chatroom::shared::config::{
    DatabaseKind, ENV_CONFIG_FILE, ENV_CONNECT_TIMEOUT, ENV_DATABASE_PASSWORD, ENV_DATABASE_TLS,
    ENV_DATABASE_URL, ENV_DATABASE_USER, ENV_SERVER_PORT,
};
use chatroom::shared::{AppConfig, ConfigError, TlsMode};
use serial_test::serial;

const ALL_KEYS: [&str; 7] = [
    ENV_CONFIG_FILE,
    ENV_DATABASE_URL,
    ENV_DATABASE_USER,
    ENV_DATABASE_PASSWORD,
    ENV_DATABASE_TLS,
    ENV_CONNECT_TIMEOUT,
    ENV_SERVER_PORT,
];

fn clear_env() {
    for key in ALL_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_postgres_from_env() {
    clear_env();
    std::env::set_var(ENV_DATABASE_URL, "postgres://db.internal:5432/chat");
    std::env::set_var(ENV_DATABASE_USER, "chat");
    std::env::set_var(ENV_DATABASE_PASSWORD, "s3cret");
    std::env::set_var(ENV_DATABASE_TLS, "verify-full");
    std::env::set_var(ENV_SERVER_PORT, "8080");

    let config = assert_ok!(AppConfig::load());
    assert_eq!(config.database.kind, DatabaseKind::Postgres);
    assert_eq!(config.database.tls, TlsMode::VerifyFull);
    assert_eq!(config.database.connect_timeout, Duration::from_secs(30));
    assert_eq!(config.server_port, 8080);

    let debug = format!("{:?}", config);
    assert!(!debug.contains("s3cret"));
    clear_env();
}

#[test]
#[serial]
fn test_missing_url_is_fatal() {
    clear_env();
    assert_matches!(
        AppConfig::load(),
        Err(ConfigError::MissingValue(key)) if key == ENV_DATABASE_URL
    );
}

#[test]
#[serial]
fn test_postgres_without_credentials_is_fatal() {
    clear_env();
    std::env::set_var(ENV_DATABASE_URL, "postgres://localhost/chat");

    assert_matches!(
        AppConfig::load(),
        Err(ConfigError::MissingValue(key)) if key == ENV_DATABASE_USER
    );
    clear_env();
}

#[test]
#[serial]
fn test_bad_timeout_is_rejected() {
    clear_env();
    std::env::set_var(ENV_DATABASE_URL, "sqlite::memory:");
    std::env::set_var(ENV_CONNECT_TIMEOUT, "soon");

    assert_matches!(
        AppConfig::load(),
        Err(ConfigError::InvalidValue { key, .. }) if key == ENV_CONNECT_TIMEOUT
    );
    clear_env();
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "database_url = \"sqlite:chat.db\"\nconnect_timeout_secs = 5\nserver_port = 4000"
    )
    .unwrap();

    std::env::set_var(ENV_CONFIG_FILE, file.path());
    std::env::set_var(ENV_SERVER_PORT, "4100");

    let config = assert_ok!(AppConfig::load());
    assert_eq!(config.database.kind, DatabaseKind::Sqlite);
    assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.server_port, 4100);
    clear_env();
}
