//! Once-per-period tick task

use std::{ops::ControlFlow, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Tick period of the stopwatch
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running tick task.
///
/// The task is aborted when the handle is dropped, so whoever owns the
/// handle owns the schedule. Ticks are counted from the moment of spawning:
/// the first fires one `period` later.
#[derive(Debug)]
pub struct Ticker {
    id: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a tick task calling `on_tick` once per `period` until it breaks
    pub fn spawn<F>(id: u64, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        debug!("Spawning ticker #{} with period {:?}", id, period);

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    debug!("Ticker #{} finished", id);
                    break;
                }
            }
        });

        Self { id, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the underlying task has ended (finished or aborted)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Ticker #{} cancelled", self.id);
    }
}
