use poise::serenity_prelude::{Channel, CreateMessage};
use tracing::info;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::excluded_channel;
use crate::utils::formatting::mention_channel;

/// Stop the GIF spam filter from watching a channel
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn exclude(
    ctx: Context<'_>,
    #[description = "Channel to exclude"] channel: Channel,
) -> Result<(), Error> {
    let channel_id = channel.id().get();

    let embed = if excluded_channel::add(&ctx.data().pool, channel_id as i64).await? {
        ctx.data().excluded_channels.insert(channel_id);
        info!("User {} excluded channel {} from the spam filter", ctx.author().id, channel_id);
        embeds::success_embed()
            .title("Channel Excluded")
            .description(format!("{} is no longer checked for GIF spam.", mention_channel(channel_id)))
    } else {
        embeds::error_embed()
            .title("Already Excluded")
            .description(format!("{} is already excluded.", mention_channel(channel_id)))
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Put a channel back under the GIF spam filter
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn include(
    ctx: Context<'_>,
    #[description = "Channel to include"] channel: Channel,
) -> Result<(), Error> {
    let channel_id = channel.id().get();

    let embed = if excluded_channel::remove(&ctx.data().pool, channel_id as i64).await? {
        ctx.data().excluded_channels.remove(&channel_id);
        info!("User {} included channel {} in the spam filter", ctx.author().id, channel_id);
        embeds::success_embed()
            .title("Channel Included")
            .description(format!("{} is checked for GIF spam again.", mention_channel(channel_id)))
    } else {
        embeds::error_embed()
            .title("Already Included")
            .description(format!("{} is already included.", mention_channel(channel_id)))
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Make the bot say something in this channel
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "What to say"] message: String,
) -> Result<(), Error> {
    ctx.channel_id()
        .send_message(ctx.http(), CreateMessage::new().content(message))
        .await?;

    ctx.send(poise::CreateReply::default().content("Sent.").ephemeral(true))
        .await?;
    Ok(())
}

/// Post an embed in this channel
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn embed(
    ctx: Context<'_>,
    #[description = "Embed title"] title: String,
    #[description = "Embed text, \\n for new lines"] description: String,
) -> Result<(), Error> {
    let embed = embeds::standard_embed()
        .title(title)
        .description(description.replace("\\n", "\n"));

    ctx.channel_id()
        .send_message(ctx.http(), CreateMessage::new().embed(embed))
        .await?;

    ctx.send(poise::CreateReply::default().content("Sent.").ephemeral(true))
        .await?;
    Ok(())
}
