use poise::serenity_prelude::{
    ComponentInteraction, Context as SerenityContext, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
};
use tracing::info;

use crate::{leaderboard, Data, Error};

/// Services a press of the persistent Refresh button. The button carries a
/// fixed custom id, so presses on messages published before the last restart
/// land here as well.
pub(crate) async fn handle_press(
    ctx: &SerenityContext,
    interaction: &ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let authorized = interaction
        .member
        .as_ref()
        .and_then(|m| m.permissions)
        .map(|p| p.manage_guild())
        .unwrap_or(false);

    info!(
        user_id = interaction.user.id.get(),
        user_name = %interaction.user.name,
        authorized,
        "Refresh button pressed"
    );

    if !authorized {
        interaction
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content("You do not have permission to refresh the leaderboard.")
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    }

    // A full refresh can outlive the interaction response window.
    interaction.defer_ephemeral(&ctx.http).await?;
    leaderboard::refresh_leaderboard(&data.refresh, &ctx.http).await?;

    interaction
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content("Leaderboard updated.")
                .ephemeral(true),
        )
        .await?;
    Ok(())
}
