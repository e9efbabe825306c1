mod menu;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_core::{
    load_config, validate_config, CatalogStore, Config, GutendexClient, Importer, SqliteStore,
};

use menu::Menu;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,bookshelf_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("BOOKSHELF_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration; a missing file means defaults, not an error.
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file at {:?}, using defaults", config_path);
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!("Database path: {:?}", config.database.path);

    // Store and client live for the whole process; the menu borrows nothing
    // global.
    let store: Arc<dyn CatalogStore> = Arc::new(
        SqliteStore::new(&config.database.path).context("Failed to open catalog database")?,
    );
    let client = Arc::new(
        GutendexClient::new(config.gutendex.clone()).context("Failed to create Gutendex client")?,
    );
    let importer = Importer::new(client, Arc::clone(&store));

    Menu::new(importer, store)
        .run()
        .await
        .context("Menu loop failed")?;

    info!("Shutting down");
    Ok(())
}
