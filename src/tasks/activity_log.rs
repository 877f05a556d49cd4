//! Stopwatch activity log background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::{state::AppState, utils::formatted_seconds};

/// Background task that logs every published stopwatch snapshot.
///
/// Returns once the snapshot channel closes.
pub async fn activity_log_task(state: Arc<AppState>) {
    info!("Starting stopwatch activity log task");

    let mut snapshot_rx = state.subscribe();
    // Only the snapshot sender keeps the channel open
    drop(state);

    while snapshot_rx.changed().await.is_ok() {
        let stopwatch = snapshot_rx.borrow_and_update().clone();
        debug!(
            "Stopwatch at {} ({:?}), laps: {:?}",
            formatted_seconds(stopwatch.elapsed_seconds()),
            stopwatch.status(),
            stopwatch.laps()
        );
    }

    debug!("Stopwatch snapshot channel closed, activity log stopped");
}
