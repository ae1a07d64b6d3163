use poise::serenity_prelude::{self as serenity, Permissions};

use crate::leaderboard::presenter::REFRESH_BUTTON_ID;
use crate::{Data, Error};

mod discord_helper;
mod limit_command;
mod refresh_button;
mod refresh_command;
mod roster_commands;

pub(crate) fn commands() -> Vec<poise::Command<Data, Error>> {
    let mut cmds: Vec<poise::Command<Data, Error>> = vec![
        roster_commands::add(),
        roster_commands::remove(),
        roster_commands::list(),
    ];

    let admin_cmds: Vec<poise::Command<Data, Error>> = vec![
        limit_command::setlimit(),
        refresh_command::refresh(),
    ];

    for mut admin_cmd in admin_cmds.into_iter() {
        admin_cmd.required_permissions = Permissions::MANAGE_GUILD;
        admin_cmd.default_member_permissions = Permissions::MANAGE_GUILD;
        cmds.push(admin_cmd);
    }

    cmds
}

pub(crate) async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate {
        interaction: serenity::Interaction::Component(component),
    } = event
    {
        if component.data.custom_id == REFRESH_BUTTON_ID {
            refresh_button::handle_press(ctx, component, data).await?;
        }
    }
    Ok(())
}
