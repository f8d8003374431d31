//! Bot configuration
//!
//! Command-line flags (each also readable from the environment) for the
//! endpoints, intervals and log file, plus the credentials loaded
//! separately through `homework_core::domain::Credentials`.

use clap::Parser;
use homework_core::domain::Credentials;
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogConfig;

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Largest lookback that still fits a signed Unix timestamp
const MAX_LOOKBACK_SECS: u64 = i64::MAX as u64;

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "homework-bot")]
#[command(about = "Notifies a Telegram chat when a homework review status changes", long_about = None)]
pub struct Args {
    /// Homework statuses endpoint
    #[arg(long, env = "HOMEWORK_ENDPOINT", default_value = homework_client::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    /// Seconds to sleep between poll cycles
    #[arg(long, env = "POLL_INTERVAL", default_value_t = 600)]
    pub poll_interval: u64,

    /// Seconds before an HTTP request is abandoned
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = homework_client::DEFAULT_TIMEOUT.as_secs())]
    pub request_timeout: u64,

    /// How far back, in seconds, the first poll looks (30 days)
    #[arg(
        long,
        env = "LOOKBACK",
        default_value_t = 2_592_000,
        value_parser = clap::value_parser!(u64).range(..=MAX_LOOKBACK_SECS)
    )]
    pub lookback: u64,

    /// Log file path
    #[arg(long, env = "LOG_FILE", default_value = "main.log")]
    pub log_file: PathBuf,

    /// Log file size that triggers rotation
    #[arg(long, env = "LOG_MAX_BYTES", default_value_t = 50_000_000)]
    pub log_max_bytes: u64,

    /// Rotated log files to keep
    #[arg(long, env = "LOG_BACKUPS", default_value_t = 2)]
    pub log_backups: usize,
}

impl Args {
    /// Logging settings, needed before credentials are read
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            path: self.log_file.clone(),
            max_bytes: self.log_max_bytes,
            backups: self.log_backups,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    /// Homework statuses endpoint (full URL)
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Fixed sleep between cycles, after success and failure alike
    pub poll_interval: Duration,

    /// Bound on every outbound HTTP request
    pub request_timeout: Duration,

    /// Width of the first fetch window
    pub lookback: Duration,
}

impl Config {
    pub fn new(args: &Args, credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: args.endpoint.clone(),
            telegram_api_url: args.telegram_api_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_secs(args.poll_interval),
            request_timeout: Duration::from_secs(args.request_timeout),
            lookback: Duration::from_secs(args.lookback),
        }
    }

    /// Initial poll cursor: now minus the lookback window
    pub fn start_cursor(&self) -> i64 {
        let lookback = i64::try_from(self.lookback.as_secs()).unwrap_or(i64::MAX);
        chrono::Utc::now().timestamp().saturating_sub(lookback)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("endpoint", &self.endpoint),
            ("telegram_api_url", &self.telegram_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.as_secs() == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.lookback.as_secs() > MAX_LOOKBACK_SECS {
            anyhow::bail!("lookback must not exceed {} seconds", MAX_LOOKBACK_SECS);
        }

        Ok(())
    }
}
