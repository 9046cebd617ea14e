//! Timer snapshot background task

use std::sync::Arc;
use futures::StreamExt;
use tracing::{debug, error, info, warn};

use crate::{engine::Timer, state::AppState};

/// Background task that follows the timer and publishes every projection to the app state
pub async fn timer_task(state: Arc<AppState>, timer: Timer) {
    info!("Starting timer task");

    let mut snapshots = timer.subscribe();
    let mut last_state = state.get_projection().timer_state;

    while let Some(projection) = snapshots.next().await {
        if projection.timer_state != last_state {
            info!("Timer {} -> {} at {}", last_state, projection.timer_state, projection.value);
            last_state = projection.timer_state;
        } else {
            debug!("Timer tick: {}", projection.value);
        }

        if let Err(e) = state.publish_projection(projection) {
            error!("Failed to update timer projection: {}", e);
        }
    }

    warn!("Timer snapshot stream ended");
}
