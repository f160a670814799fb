use poise::serenity_prelude::{Message, User};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds::{self, DIVIDER};
use crate::utils::formatting::remove_spoilers;

/// Check the bot's gateway latency
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    let description = if latency.is_zero() {
        "Pong! Latency isn't measured yet, try again in a minute.".to_string()
    } else {
        format!("Pong! Gateway latency is **{}ms**.", latency.as_millis())
    };

    ctx.send(
        poise::CreateReply::default()
            .embed(embeds::standard_embed().description(description))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Information about this server
#[poise::command(slash_command, guild_only)]
pub async fn serverinfo(ctx: Context<'_>) -> Result<(), Error> {
    let embed = {
        let guild = ctx
            .guild()
            .ok_or(Error::custom("Server isn't cached yet, try again shortly"))?;

        let mut embed = embeds::standard_embed()
            .title(&guild.name)
            .description(DIVIDER)
            .field("Owner", format!("<@{}>", guild.owner_id), true)
            .field("Members", guild.member_count.to_string(), true)
            .field("Channels", guild.channels.len().to_string(), true)
            .field("Roles", guild.roles.len().to_string(), true)
            .field(
                "Boosts",
                guild.premium_subscription_count.unwrap_or(0).to_string(),
                true,
            )
            .field(
                "Created",
                format!("<t:{}:D>", guild.id.created_at().unix_timestamp()),
                true,
            );

        if let Some(icon) = guild.icon_url() {
            embed = embed.thumbnail(icon);
        }
        embed
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show help for commands
#[poise::command(slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help for"] command: Option<String>,
) -> Result<(), Error> {
    let config = poise::builtins::HelpConfiguration {
        ephemeral: true,
        extra_text_at_bottom: "Use /help <command> for details on a command.",
        ..Default::default()
    };
    poise::builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}

/// Show a member's ID
#[poise::command(context_menu_command = "Grab ID", guild_only)]
pub async fn grab_id(ctx: Context<'_>, user: User) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(format!("{}'s ID: `{}`", user.name, user.id))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Show a message without its spoiler tags
#[poise::command(context_menu_command = "Remove spoilers")]
pub async fn remove_spoilers_menu(ctx: Context<'_>, message: Message) -> Result<(), Error> {
    let content = remove_spoilers(&message.content);
    let content = if content.trim().is_empty() {
        "That message has no text.".to_string()
    } else {
        content
    };

    ctx.send(poise::CreateReply::default().content(content).ephemeral(true))
        .await?;
    Ok(())
}
