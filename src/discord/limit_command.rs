use crate::discord::discord_helper;
use crate::{fmt, Context, Error};

/// Set how many entries the leaderboard shows.
// Gated to Manage Guild in the command registry.
#[poise::command(slash_command)]
pub async fn setlimit(
    ctx: Context<'_>,
    #[description = "Maximum number of entries shown on the leaderboard"] limit: u32,
) -> Result<(), Error> {
    discord_helper::log_invocation(&ctx);
    ctx.data().refresh.store.set_limit(limit as usize)?;
    discord_helper::private_reply(&ctx, fmt!("Leaderboard display limit set to {limit}.")).await?;
    Ok(())
}
