use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use housekeeping::bot;
use housekeeping::catalog::Catalog;
use housekeeping::config::BotConfig;
use housekeeping::dialogue::NavigationNode;
use housekeeping::engine::Housekeeper;
use housekeeping::health;
use housekeeping::localization::init_localization;
use housekeeping::sink::build_sink;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Housekeeping Telegram Bot");

    init_localization()?;
    let config = BotConfig::from_env()?;

    // Catalog errors are fatal: fail before polling starts
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    info!(
        locations = catalog.locations().len(),
        zones = catalog.zones().len(),
        "Catalog ready"
    );

    let sink = build_sink(&config)?;
    let housekeeper = Arc::new(Housekeeper::new(Arc::new(catalog), sink));

    let health_addr = config.health_addr;
    tokio::spawn(async move {
        if let Err(e) = health::serve(health_addr).await {
            error!(error = %e, "Health endpoint stopped");
        }
    });

    let bot = Bot::new(&config.bot_token);
    if let Err(e) = bot.set_my_commands(bot::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    // The dispatcher handles the updates of one chat sequentially, so a
    // session never sees two transitions at once
    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![
            InMemStorage::<NavigationNode>::new(),
            housekeeper
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
