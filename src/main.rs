//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration and Types
//! - Infrastructure: Discord, Ship-Data Client, Store
//! - Application: Router
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::traits::{ShipDataProvider, ShipListStore};
use crate::infrastructure::shipdata::ShipDataClient;
use crate::infrastructure::store::RedisStore;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load Configuration
    let config_content =
        fs::read_to_string("data/config.yaml").context("Failed to read config.yaml")?;
    let config: AppConfig =
        serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = std::path::Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,serenity=warn,tungstenite=warn,hyper=warn,reqwest=warn")
    });

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();

    tracing::info!("Starting Shipmate...");

    // 3. Initialize Infrastructure
    // A store that cannot be reached is logged and skipped; syncs then reply
    // without persisting.
    let store: Option<Arc<dyn ShipListStore>> = match config.services.redis.resolve_url() {
        Ok(url) => match RedisStore::connect(&url).await {
            Ok(store) => {
                tracing::info!("Connected to Redis");
                Some(Arc::new(store))
            }
            Err(e) => {
                tracing::error!("Redis connection error: {e:#}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Redis connection error: {e:#}");
            None
        }
    };

    let shipdata: Arc<dyn ShipDataProvider> =
        Arc::new(ShipDataClient::new(&config.services.shipdata));

    // 4. Application Components
    let router = Arc::new(CommandRouter::new(shipdata, store));

    // 5. Discord Event Loop
    let token = config.services.discord.resolve_token()?;
    if let Err(e) = infrastructure::discord::run(&token, router).await {
        tracing::error!("Discord client error: {e:#}");
    }

    Ok(())
}
