use crate::discord::discord_helper;
use crate::{leaderboard, str, Context, Error};

/// Rebuild and repost the leaderboard.
// Same pipeline as the startup and scheduled refreshes; gated to Manage Guild
// in the command registry.
#[poise::command(slash_command)]
pub async fn refresh(ctx: Context<'_>) -> Result<(), Error> {
    discord_helper::log_invocation(&ctx);

    // A full refresh can outlive the interaction response window.
    ctx.defer_ephemeral().await?;
    leaderboard::refresh_leaderboard(&ctx.data().refresh, &ctx.serenity_context().http).await?;

    discord_helper::private_reply(&ctx, str!("Leaderboard updated.")).await?;
    Ok(())
}
