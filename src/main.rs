mod config;
mod moderation;
mod platform;
mod poller;
mod policy;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Cli;
use crate::moderation::Moderator;
use crate::platform::telegram::TelegramClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,joinguard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse().into_config()?;
    info!("Configuration loaded");
    info!("  Chat: {}", config.session.chat_id);
    info!("  User name limit: {}", config.policy.limit());

    let client = TelegramClient::new(config.session.clone())?;
    let moderator = Moderator::new(&client, config.policy);

    info!("Bot running on chat {}", config.session.chat_id);
    poller::run(&client, moderator, poller::RETRY_DELAY).await;

    Ok(())
}
