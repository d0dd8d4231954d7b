// `/setchannel` - pick the channel the bot replies in.
//
// Same thin-layer pattern as the rest of the Discord code: pull the ids out
// of the interaction, hand them to the core service, report back.

use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Choose the channel where the AI answers messages.
///
/// Any member allowed to run commands in the server can change this.
#[poise::command(slash_command, guild_only, rename = "setchannel")]
pub async fn set_channel(
    ctx: Context<'_>,
    #[description = "Channel the AI should reply in"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be in a guild")?.get();
    let channel_id = channel.id.get();

    ctx.data().channels.set_channel(guild_id, channel_id).await;

    ctx.send(
        poise::CreateReply::default()
            .content(confirmation_text(channel_id))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

fn confirmation_text(channel_id: u64) -> String {
    format!("✅ AI reply channel set to <#{}>!", channel_id)
}
