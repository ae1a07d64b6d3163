mod config;
mod discord;
mod leaderboard;
mod logging;
mod riot;
mod scheduler;
mod store;
mod util;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::leaderboard::RefreshContext;

#[derive(Debug)]
pub struct Data {
    pub refresh: Arc<RefreshContext>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    if std::env::var("RUST_BACKTRACE").is_err() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    let cfg = config::load_config()?;

    logging::init(&cfg)?;
    info!("Logging initialised. Initialising rankcord application");

    let token = cfg.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(discord::event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    error!("Poise error: {:?}", error);
                    if let Err(e) = poise::builtins::on_error(error).await {
                        error!("Error while handling error: {:?}", e);
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(bot_user = %ready.user.name, "Connected to Discord");

                info!("Registering application commands");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let refresh = Arc::new(RefreshContext::new(cfg));
                scheduler::spawn_scheduler(refresh.clone(), ctx.http.clone());
                spawn_startup_refresh(refresh.clone(), ctx.http.clone());

                Ok(Data { refresh })
            })
        })
        .build();

    let mut client =
        serenity::ClientBuilder::new(token, serenity::GatewayIntents::non_privileged())
            .framework(framework)
            .await?;

    info!("Setup complete. Starting client listener");

    client.start().await?;
    Ok(())
}

/// Publishes the first leaderboard of this process without holding up the
/// gateway task.
fn spawn_startup_refresh(ctx: Arc<RefreshContext>, http: Arc<serenity::Http>) {
    tokio::spawn(async move {
        if let Err(e) = leaderboard::refresh_leaderboard(&ctx, &http).await {
            error!(error = ?e, "Startup refresh failed");
        }
    });
}
