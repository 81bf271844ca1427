//! Progress poll
//!
//! While a track plays, a background task sends a `ProgressTick` every
//! interval. Dropping the poll aborts the task.

use crate::engine::SessionMessage;
use crate::types::ResourceHandle;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub(crate) struct ProgressPoll {
    handle: ResourceHandle,
    task: JoinHandle<()>,
}

impl ProgressPoll {
    /// Start ticking for `handle`; the first tick comes one interval from now
    pub(crate) fn start(
        handle: ResourceHandle,
        interval: Duration,
        tx: mpsc::UnboundedSender<SessionMessage>,
    ) -> Self {
        let period = interval.max(MIN_INTERVAL);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval yields immediately on the first tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(SessionMessage::ProgressTick { handle }).is_err() {
                    break;
                }
            }
        });

        tracing::trace!("Progress poll started for {}", handle);
        Self { handle, task }
    }
}

impl Drop for ProgressPoll {
    fn drop(&mut self) {
        self.task.abort();
        tracing::trace!("Progress poll cancelled for {}", self.handle);
    }
}
