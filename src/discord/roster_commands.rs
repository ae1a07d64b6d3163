use std::str::FromStr;

use crate::discord::discord_helper;
use crate::riot::riot_id::RiotId;
use crate::{fmt, str, Context, Error};

/// Track a player on the leaderboard.
#[poise::command(slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Riot ID of the player to track, as name#tag"] riot_id: String,
) -> Result<(), Error> {
    discord_helper::log_invocation(&ctx);
    let Some(id) = parse_riot_id(&ctx, &riot_id).await? else {
        return Ok(());
    };

    let added = ctx.data().refresh.store.add_player(&id)?;
    let message = if added {
        fmt!("Added {id} to the leaderboard.")
    } else {
        fmt!("Player {id} is already on the leaderboard.")
    };
    discord_helper::private_reply(&ctx, message).await?;
    Ok(())
}

/// Stop tracking a player.
#[poise::command(slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Riot ID of the player to stop tracking, as name#tag"] riot_id: String,
) -> Result<(), Error> {
    discord_helper::log_invocation(&ctx);
    let Some(id) = parse_riot_id(&ctx, &riot_id).await? else {
        return Ok(());
    };

    let removed = ctx.data().refresh.store.remove_player(&id)?;
    let message = if removed {
        fmt!("Removed {id} from the leaderboard.")
    } else {
        fmt!("Player {id} is not on the leaderboard.")
    };
    discord_helper::private_reply(&ctx, message).await?;
    Ok(())
}

/// Show the tracked roster.
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    discord_helper::log_invocation(&ctx);
    let roster = ctx.data().refresh.store.load();

    if roster.players.is_empty() {
        discord_helper::private_reply(&ctx, str!("No players are tracked yet.")).await?;
        return Ok(());
    }

    let mut lines = vec![fmt!(
        "Tracking {} players (display limit {}):",
        roster.players.len(),
        roster.limit
    )];
    for player in &roster.players {
        lines.push(fmt!("- {}", player.riot_id()));
    }
    discord_helper::private_reply(&ctx, lines.join("\n")).await?;
    Ok(())
}

/// Replies with a validation error and yields `None` when the handle is not a
/// well-formed `name#tag`.
async fn parse_riot_id(ctx: &Context<'_>, riot_id: &str) -> Result<Option<RiotId>, Error> {
    match RiotId::from_str(riot_id) {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            discord_helper::private_reply(ctx, fmt!("Invalid Riot ID `{riot_id}`: {e}.")).await?;
            Ok(None)
        }
    }
}
