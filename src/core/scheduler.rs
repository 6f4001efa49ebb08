//! Cancellable timer tasks on the tokio runtime.
//!
//! A `ScheduledTask` walks a schedule of `(offset, item)` pairs, sleeping
//! until each offset (measured from spawn) and handing the item to a
//! callback. Dropping or cancelling the task aborts whatever sleep is
//! pending, so nothing fires after teardown.

use crate::widgets::{RotationStep, RotationTiming};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Handle to a spawned timer task. Aborts the task on drop.
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn a task that fires `fire(item)` at each offset in `schedule`.
    ///
    /// Stops when the schedule ends or `fire` returns false.
    /// Must be called from within a tokio runtime.
    pub fn spawn<I, T, F>(schedule: I, mut fire: F) -> Self
    where
        I: IntoIterator<Item = (Duration, T)> + Send + 'static,
        I::IntoIter: Send + 'static,
        T: Send + 'static,
        F: FnMut(T) -> bool + Send + 'static,
    {
        let start = Instant::now();
        let handle = tokio::spawn(async move {
            for (offset, item) in schedule {
                sleep_until(start + offset).await;
                if !fire(item) {
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Abort the task. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True until the task is cancelled or runs out of schedule
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A rotation step tagged with the mount it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationEvent {
    pub generation: u64,
    pub step: RotationStep,
}

/// Drive a tip rotator: send each scheduled step to the UI loop.
///
/// The task ends on its own once the receiver is gone.
pub fn spawn_rotation(
    timing: RotationTiming,
    generation: u64,
    tx: mpsc::UnboundedSender<RotationEvent>,
) -> ScheduledTask {
    tracing::debug!(
        generation,
        interval_ms = timing.interval().as_millis() as u64,
        fade_ms = timing.fade().as_millis() as u64,
        "Starting tip rotation timer"
    );
    ScheduledTask::spawn(timing.schedule(), move |step| {
        tx.send(RotationEvent { generation, step }).is_ok()
    })
}
