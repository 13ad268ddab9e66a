use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a background task that sweeps expired anonymous statuses off the
/// live feed. The sweep rebroadcasts the feed whenever it removed anything.
pub fn spawn_status_sweeper(state: Arc<AppState>) {
    let interval = Duration::from_secs(state.config.sweep_interval_secs.max(1));

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;

            let removed = state.sweep_expired_statuses().await;
            if removed > 0 {
                tracing::info!("Expired {} statuses off the live feed", removed);
            }
        }
    });
}
