//! Application configuration module
//!
//! Configuration is read once at process start. Sources, lowest precedence
//! first:
//!
//! 1. A TOML file named by `CHATROOM_CONFIG` (optional)
//! 2. Environment variables (the server loads `.env` before reading them)
//!
//! There are no built-in credentials. A PostgreSQL URL without a user and a
//! password is a startup error.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_CONFIG_FILE: &str = "CHATROOM_CONFIG";
pub const ENV_DATABASE_URL: &str = "CHATROOM_DATABASE_URL";
pub const ENV_DATABASE_USER: &str = "CHATROOM_DATABASE_USER";
pub const ENV_DATABASE_PASSWORD: &str = "CHATROOM_DATABASE_PASSWORD";
pub const ENV_DATABASE_TLS: &str = "CHATROOM_DATABASE_TLS";
pub const ENV_CONNECT_TIMEOUT: &str = "CHATROOM_CONNECT_TIMEOUT_SECS";
pub const ENV_SERVER_PORT: &str = "SERVER_PORT";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Transport security for the database connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TlsMode {
    /// Plain TCP
    Disable,
    /// Encrypt when the server offers it
    Prefer,
    /// Always encrypt, accept any certificate
    #[default]
    Require,
    /// Always encrypt and verify the certificate chain and host name
    VerifyFull,
}

impl FromStr for TlsMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "prefer" => Ok(Self::Prefer),
            "require" | "trust-all" => Ok(Self::Require),
            "verify-full" => Ok(Self::VerifyFull),
            other => Err(ConfigError::InvalidValue {
                key: ENV_DATABASE_TLS,
                value: other.to_string(),
            }),
        }
    }
}

/// Which graph backend a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Sqlite,
}

impl DatabaseKind {
    fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            Err(ConfigError::InvalidUrl(url.to_string()))
        }
    }
}

/// Database connection settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub kind: DatabaseKind,
    pub user: Option<String>,
    pub password: Option<String>,
    pub tls: TlsMode,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// The URL with any embedded `user:password@` replaced by `***@`
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{}://***{}", scheme, &rest[at..]),
            None => self.url.clone(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.redacted_url())
            .field("kind", &self.kind)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("tls", &self.tls)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server_port: u16,
}

/// On-disk shape of the optional TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    database_url: Option<String>,
    database_user: Option<String>,
    database_password: Option<String>,
    database_tls: Option<TlsMode>,
    connect_timeout_secs: Option<u64>,
    server_port: Option<u16>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = match lookup(ENV_CONFIG_FILE) {
            Some(path) => AppConfigBuilder::from_file(Path::new(&path))?,
            None => AppConfigBuilder::default(),
        };

        if let Some(url) = lookup(ENV_DATABASE_URL) {
            builder = builder.database_url(url);
        }
        if let Some(user) = lookup(ENV_DATABASE_USER) {
            builder = builder.database_user(user);
        }
        if let Some(password) = lookup(ENV_DATABASE_PASSWORD) {
            builder = builder.database_password(password);
        }
        if let Some(tls) = lookup(ENV_DATABASE_TLS) {
            builder = builder.tls(tls.parse()?);
        }
        if let Some(secs) = lookup(ENV_CONNECT_TIMEOUT) {
            let secs = secs.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_CONNECT_TIMEOUT,
                value: secs.clone(),
            })?;
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(port) = lookup(ENV_SERVER_PORT) {
            let port = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_SERVER_PORT,
                value: port.clone(),
            })?;
            builder = builder.server_port(port);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let database = &self.database;
        if database.kind == DatabaseKind::Postgres {
            if database.user.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingValue(ENV_DATABASE_USER));
            }
            if database.password.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingValue(ENV_DATABASE_PASSWORD));
            }
        }
        if database.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: ENV_CONNECT_TIMEOUT,
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    database_user: Option<String>,
    database_password: Option<String>,
    tls: Option<TlsMode>,
    connect_timeout: Option<Duration>,
    server_port: Option<u16>,
}

impl AppConfigBuilder {
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw)?;
        Ok(Self {
            database_url: file.database_url,
            database_user: file.database_user,
            database_password: file.database_password,
            tls: file.database_tls,
            connect_timeout: file.connect_timeout_secs.map(Duration::from_secs),
            server_port: file.server_port,
        })
    }

    /// Set the database URL (`postgres://…` or `sqlite:…`)
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn database_user(mut self, user: impl Into<String>) -> Self {
        self.database_user = Some(user.into());
        self
    }

    pub fn database_password(mut self, password: impl Into<String>) -> Self {
        self.database_password = Some(password.into());
        self
    }

    pub fn tls(mut self, tls: TlsMode) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let url = self
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingValue(ENV_DATABASE_URL))?;
        let kind = DatabaseKind::from_url(&url)?;

        let config = AppConfig {
            database: DatabaseConfig {
                url,
                kind,
                user: self.database_user,
                password: self.database_password,
                tls: self.tls.unwrap_or_default(),
                connect_timeout: self
                    .connect_timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            },
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
        };
        config.validate()?;
        Ok(config)
    }
}
