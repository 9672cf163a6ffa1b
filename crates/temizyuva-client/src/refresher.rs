//! Background token refresh timer

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::session::SessionManager;

/// Default period between checks
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Handle to the running refresh task
#[derive(Debug)]
pub struct Refresher {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Refresher {
    /// Start checking the session every `period`
    ///
    /// The first check runs one full period after start; callers restore or
    /// log in first. The task keeps running after a forced logout so a later
    /// login is picked up without restarting it.
    pub fn spawn(session: Arc<SessionManager>, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(period_seconds = period.as_secs(), "Token refresher started");

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = interval.tick() => {
                        let alive = session.refresh_if_needed().await;
                        debug!(alive, "Token check finished");
                    }
                }
            }

            info!("Token refresher stopped");
        });

        Self { cancel, handle }
    }

    /// Token that stops the task when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "Token refresher ended abnormally");
        }
    }
}
