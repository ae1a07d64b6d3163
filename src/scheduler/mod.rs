use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude::Http;
use tokio::time;
use tracing::{error, info};

use crate::leaderboard::{self, RefreshContext};

/// Spawns the periodic refresh task when an interval is configured.
pub fn spawn_scheduler(ctx: Arc<RefreshContext>, http: Arc<Http>) {
    let interval_mins = match ctx.config.refresh_interval_minutes {
        Some(mins) if mins > 0 => mins,
        _ => {
            info!("Scheduled refresh is disabled in configuration");
            return;
        }
    };

    info!(interval_mins, "Starting scheduled refresh task");
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(interval_mins * 60));
        // The first tick completes immediately; startup already publishes once.
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = leaderboard::refresh_leaderboard(&ctx, &http).await {
                error!(error = ?e, "Scheduled refresh failed");
            }
        }
    });
}
