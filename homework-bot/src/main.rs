//! Homework Bot
//!
//! Watches the Practicum homework review API and tells a Telegram chat when
//! the review status of the latest submission changes.
//!
//! Architecture:
//! - Configuration: CLI flags / environment, plus three required secrets
//! - Logging: stdout and a size-capped rotating log file
//! - Repositories: HTTP communication with the review API and Telegram
//! - Services: notification delivery
//! - Scheduler: the fetch, validate, notify, sleep loop
//!
//! Only a missing secret or bad configuration stops the bot at startup;
//! once polling, every error is logged and retried after the fixed sleep.

mod config;
mod logging;
mod repository;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use clap::Parser;
use homework_client::PracticumClient;
use homework_core::domain::Credentials;
use std::sync::Arc;
use tracing::info;

use crate::config::{Args, Config};
use crate::repository::{HttpHomeworkRepository, TelegramMessenger};
use crate::scheduler::Poller;
use crate::service::Notifier;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    logging::init(&args.log_config())?;

    info!("Starting homework bot");

    // Load configuration
    let credentials = Credentials::from_env().context("Required tokens are missing")?;
    let config = Config::new(&args, credentials);
    config.validate()?;
    info!(
        "Loaded configuration: endpoint={}, poll_interval={:?}, request_timeout={:?}",
        config.endpoint, config.poll_interval, config.request_timeout
    );

    // Initialize clients
    let client = PracticumClient::with_timeout(
        config.endpoint.clone(),
        config.credentials.practicum_token.clone(),
        config.request_timeout,
    )
    .context("Failed to build homework API client")?;
    let homeworks = Arc::new(HttpHomeworkRepository::new(client));

    let messenger = Arc::new(
        TelegramMessenger::new(
            config.telegram_api_url.clone(),
            config.credentials.telegram_token.clone(),
            config.credentials.telegram_chat_id.clone(),
            config.request_timeout,
        )
        .context("Failed to build Telegram client")?,
    );
    let notifier = Notifier::new(messenger);

    let mut poller = Poller::new(
        homeworks,
        notifier,
        config.poll_interval,
        config.start_cursor(),
    );

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received, stopping homework bot");
        }
    }

    info!("Stopped with from_date={}", poller.cursor());

    Ok(())
}
