use std::sync::Arc;

use poise::serenity_prelude::{
    ButtonStyle, ChannelId, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateMessage,
    GetMessages, Http,
};
use tracing::info;

use crate::leaderboard::builder::RankedEntry;
use crate::{fmt, Error};

/// Fixed component id so the gateway handler can service presses on messages
/// published by earlier process lifetimes.
pub const REFRESH_BUTTON_ID: &str = "rankcord_refresh";

/// Replaces the channel's contents with one freshly rendered leaderboard
/// message carrying the Refresh button.
pub async fn publish(
    http: &Arc<Http>,
    channel_id: u64,
    entries: &[RankedEntry],
) -> Result<(), Error> {
    let channel = ChannelId::new(channel_id);
    purge_channel(http, channel).await?;

    let message = CreateMessage::new()
        .embed(build_embed(entries))
        .components(vec![CreateActionRow::Buttons(vec![refresh_button()])]);
    channel.send_message(http, message).await?;

    info!(channel_id, entries = entries.len(), "Leaderboard published");
    Ok(())
}

/// Deletes whatever the channel currently holds so exactly one leaderboard
/// message remains after publishing. Failures propagate to the caller.
async fn purge_channel(http: &Arc<Http>, channel: ChannelId) -> Result<(), Error> {
    let messages = channel.messages(http, GetMessages::new().limit(100)).await?;
    info!(
        channel_id = channel.get(),
        count = messages.len(),
        "Clearing previous leaderboard messages"
    );
    for message in messages {
        message.delete(http).await?;
    }
    Ok(())
}

fn refresh_button() -> CreateButton {
    CreateButton::new(REFRESH_BUTTON_ID)
        .style(ButtonStyle::Success)
        .label("Refresh")
}

fn build_embed(entries: &[RankedEntry]) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title("Leaderboard").colour(Colour::BLUE);
    for (name, value) in embed_fields(entries) {
        embed = embed.field(name, value, false);
    }
    embed
}

/// Embed field name/value pairs, one per entry, in final display order.
fn embed_fields(entries: &[RankedEntry]) -> Vec<(String, String)> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let name = fmt!("{}\u{fe0f}\u{20e3} {}", idx + 1, entry.riot_id);
            let mut value = fmt!(
                "{} {} {} LP - {}/{}",
                entry.tier,
                entry.division,
                entry.league_points,
                entry.wins,
                entry.losses
            );
            if entry.hot_streak {
                value.push_str(" - 🔥");
            }
            (name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::ranks::{Division, Tier};

    #[test]
    fn fields_render_rank_position_and_standing() {
        let entries = vec![
            RankedEntry {
                riot_id: "Faker#KR1".to_string(),
                tier: Tier::Challenger,
                division: Division::I,
                league_points: 1024,
                wins: 120,
                losses: 60,
                hot_streak: true,
            },
            RankedEntry {
                riot_id: "Smurf#EUW".to_string(),
                tier: Tier::Gold,
                division: Division::IV,
                league_points: 12,
                wins: 9,
                losses: 11,
                hot_streak: false,
            },
        ];

        let fields = embed_fields(&entries);
        assert_eq!(fields.len(), 2);

        assert_eq!(fields[0].0, "1\u{fe0f}\u{20e3} Faker#KR1");
        assert_eq!(fields[0].1, "CHALLENGER I 1024 LP - 120/60 - 🔥");

        assert_eq!(fields[1].0, "2\u{fe0f}\u{20e3} Smurf#EUW");
        assert_eq!(fields[1].1, "GOLD IV 12 LP - 9/11");
    }

    #[test]
    fn empty_board_renders_no_fields() {
        assert!(embed_fields(&[]).is_empty());
    }
}
