use poise::{CreateReply, ReplyHandle};
use tracing::{debug, info};

use crate::{Context, Error};

pub(crate) fn log_invocation(ctx: &Context<'_>) {
    info!(
        command_name = ctx.invoked_command_name(),
        command_text = ctx.invocation_string(),
        user_id = ctx.author().id.get(),
        user_name = %ctx.author().name,
        "Command invoked"
    );
}

pub(crate) async fn private_reply<'a>(
    ctx: &'a Context<'a>,
    content: String,
) -> Result<ReplyHandle<'a>, Error> {
    debug!(content = content, "Sending private reply");
    Ok(ctx
        .send(CreateReply::default().content(content).ephemeral(true))
        .await?)
}
