//! Homework status poller
//!
//! Polls the review API once per interval, notifies the chat about the most
//! recent submission in the window, and moves the cursor forward to the
//! server's `current_date`.

use homework_core::domain::parse_status;
use homework_core::dto::HomeworkStatuses;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::repository::HomeworkRepository;
use crate::scheduler::error::{CycleError, FailureKind};
use crate::service::Notifier;

/// Consecutive contract failures after which an extra alert line is logged
pub const CONTRACT_FAILURE_ALERT_THRESHOLD: u32 = 3;

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found; `delivered` tells whether the message
    /// made it to the chat
    Notified { delivered: bool },
    /// The window held no submissions
    NoUpdates,
    /// The cycle failed and will be retried after the sleep
    Failed(FailureKind),
}

pub struct Poller {
    homeworks: Arc<dyn HomeworkRepository>,
    notifier: Notifier,
    interval: Duration,
    /// Lower bound (Unix seconds) of the next fetch window
    cursor: i64,
    /// Schema and unknown-status failures since the last good cycle
    contract_failures: u32,
}

impl Poller {
    /// Creates a poller starting its first window at `start_cursor`
    pub fn new(
        homeworks: Arc<dyn HomeworkRepository>,
        notifier: Notifier,
        interval: Duration,
        start_cursor: i64,
    ) -> Self {
        Self {
            homeworks,
            notifier,
            interval,
            cursor: start_cursor,
            contract_failures: 0,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    #[cfg(test)]
    pub fn contract_failures(&self) -> u32 {
        self.contract_failures
    }

    /// Runs forever, sleeping `interval` after every cycle
    ///
    /// Failures are retried with the same fixed sleep, without backoff and
    /// without a retry cap. A persistent failure keeps logging until the
    /// process is stopped.
    pub async fn run(&mut self) {
        info!(
            "Starting homework poller (interval: {:?}, from_date: {})",
            self.interval, self.cursor
        );

        loop {
            self.tick().await;
            debug!("Sleeping for {:?}", self.interval);
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Performs one cycle and never fails; errors are logged and classified
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => {
                self.contract_failures = 0;
                outcome
            }
            Err(e) => {
                let kind = e.kind();
                error!("{}: {}", e.summary(), e);

                if kind.is_contract() {
                    self.contract_failures += 1;
                    if self.contract_failures == CONTRACT_FAILURE_ALERT_THRESHOLD {
                        error!(
                            "Homework API contract failed {} cycles in a row; the response format may have changed",
                            self.contract_failures
                        );
                    }
                }

                CycleOutcome::Failed(kind)
            }
        }
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        debug!("Polling homework statuses from_date={}", self.cursor);

        let body = self.homeworks.fetch_statuses(Some(self.cursor)).await?;

        let statuses = match HomeworkStatuses::from_json(&body) {
            Ok(statuses) => statuses,
            Err(e) if e.is_empty() => {
                debug!("No new homework statuses");
                return Ok(CycleOutcome::NoUpdates);
            }
            Err(e) => return Err(e.into()),
        };

        let homework = statuses.latest()?;
        let message = parse_status(&homework)?;
        let delivered = self.notifier.send_message(&message).await;

        self.cursor = match statuses.current_date {
            Some(current_date) => current_date,
            None => {
                warn!("Response has no current_date, restarting window from now");
                chrono::Utc::now().timestamp()
            }
        };
        debug!("Cursor advanced to {}", self.cursor);

        Ok(CycleOutcome::Notified { delivered })
    }
}
