pub(crate) mod builder;
pub(crate) mod presenter;

use std::sync::Arc;

use poise::serenity_prelude::Http;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::riot::league_api::LeagueApi;
use crate::store::Store;
use crate::Error;

/// Process-scoped context shared by every refresh trigger: startup, the
/// Refresh button, /refresh, and the scheduler.
#[derive(Debug)]
pub struct RefreshContext {
    pub config: AppConfig,
    pub store: Store,
    pub api: LeagueApi,
    trigger_lock: Mutex<()>,
}

impl RefreshContext {
    pub fn new(config: AppConfig) -> Self {
        let store = Store::new(config.data_path.clone());
        let api = LeagueApi::new(&config);
        Self {
            config,
            store,
            api,
            trigger_lock: Mutex::new(()),
        }
    }
}

/// Runs the full pipeline: load roster, fetch standings, publish. Triggers
/// are serialized; a second trigger waits for the in-flight one to finish.
pub async fn refresh_leaderboard(ctx: &RefreshContext, http: &Arc<Http>) -> Result<(), Error> {
    let _guard = ctx.trigger_lock.lock().await;

    let roster = ctx.store.load();
    let entries = builder::build(&ctx.api, &roster, ctx.config.fetch_concurrency).await;
    presenter::publish(http, ctx.config.leaderboard_channel_id, &entries).await
}
