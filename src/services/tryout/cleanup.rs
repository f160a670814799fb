use std::sync::Arc;

use chrono::Utc;
use tokio::time::interval;
use tracing::{error, info};

use crate::bot::data::Data;
use crate::constants::timeouts::{format_duration, TRYOUT_CLEANUP_INTERVAL};
use crate::db::queries::tryout_invite;

/// Start the background task that forgets expired tryout invites
pub fn spawn_invite_cleanup(data: Arc<Data>) {
    info!(
        "Started tryout invite cleanup (every {})",
        format_duration(TRYOUT_CLEANUP_INTERVAL)
    );

    tokio::spawn(async move {
        let mut ticker = interval(TRYOUT_CLEANUP_INTERVAL);

        loop {
            ticker.tick().await;

            match tryout_invite::delete_expired(&data.pool, Utc::now()).await {
                Ok(0) => {}
                Ok(removed) => info!("Removed {} expired tryout invites", removed),
                Err(e) => error!("Error cleaning up tryout invites: {:?}", e),
            }
        }
    });
}
