use chatroom::shared::AppConfig;
use chatroom::store::{connector_for, MessageStore};

/// Connect with the configured database, run the liveness probe and show the
/// newest messages. Exits non-zero when the store cannot be reached.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("PROBING MESSAGE STORE CONNECTION");
    println!("================================");

    let config = AppConfig::load()?;
    println!("Database: {:?} ({})", config.database.kind, config.database.redacted_url());
    println!("TLS mode: {:?}", config.database.tls);
    println!("Connect timeout: {:?}", config.database.connect_timeout);

    let connector = connector_for(&config.database)?;
    println!("Target: {}", connector.describe());

    let store = MessageStore::from_boxed(connector);
    if let Err(e) = store.connect().await {
        println!("Connection failed: {}", e);
        return Err(e.into());
    }
    println!("Connection verified");

    match store.probe().await {
        Ok(clock) => println!("Database clock: {} ms since epoch", clock),
        Err(e) => println!("Probe failed: {}", e),
    }

    match store.list_messages().await {
        Ok(messages) => {
            println!("\n{} message(s) in the timeline", messages.len());
            for message in messages.iter().take(5) {
                match (message.parent_user(), message.parent_text()) {
                    (Some(parent_user), Some(parent_text)) => println!(
                        "  {} {}: {}  (reply to {}: {})",
                        message.id, message.user, message.text, parent_user, parent_text
                    ),
                    _ => println!("  {} {}: {}", message.id, message.user, message.text),
                }
            }
        }
        Err(e) => println!("Timeline read failed: {}", e),
    }

    store.shutdown().await;
    Ok(())
}
