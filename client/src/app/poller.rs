//! Periodic feed refresh
//!
//! Runs a refresh on a fixed period until the returned handle is stopped
//! or dropped.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Shortest period the poller accepts
pub const MIN_POLL_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running poll task
pub struct PollHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Spawn a task calling `tick` every `period`. The first call happens
    /// one full period after spawning. Periods below `MIN_POLL_PERIOD`
    /// are raised to it.
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = if period < MIN_POLL_PERIOD {
            tracing::warn!(
                requested_ms = period.as_millis() as u64,
                "Poll period too short, using the minimum"
            );
            MIN_POLL_PERIOD
        } else {
            period
        };
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            tracing::info!(period_secs = period.as_secs(), "Feed polling started");

            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        tracing::debug!("Polling feed");
                        tick().await;
                    }
                }
            }

            tracing::info!("Feed polling stopped");
        });

        Self {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    /// Stop polling and wait for an in-progress refresh to finish
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Poll task ended abnormally");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
