use poise::serenity_prelude::User;
use tracing::info;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::warning as warns;
use crate::utils::formatting::{mention_user, truncate};

const DEFAULT_REASON: &str = "No reason provided";

/// Discord limit for an embed description
const DESCRIPTION_MAX: usize = 4096;

/// Member warnings
#[poise::command(
    slash_command,
    subcommands("add", "remove", "list"),
    guild_only,
    required_permissions = "MODERATE_MEMBERS"
)]
pub async fn warning(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/warning add`, `/warning remove`, `/warning list`").await?;
    Ok(())
}

/// Warn a member
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Member to warn"] user: User,
    #[description = "Reason"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| DEFAULT_REASON.to_string());

    let warning = warns::add(
        &ctx.data().pool,
        user.id.get() as i64,
        guild_id.get() as i64,
        ctx.author().id.get() as i64,
        &reason,
    )
    .await?;
    let total = warns::count(&ctx.data().pool, user.id.get() as i64, guild_id.get() as i64).await?;

    info!(
        "User {} warned {} in {} (#{}): {}",
        ctx.author().id, user.id, guild_id, warning.id, reason
    );

    let embed = embeds::warning_embed()
        .title(format!("Warning #{}", warning.id))
        .description(format!(
            "{} has been warned.\n**Reason:** {}\n**Total warnings:** {}",
            mention_user(user.id),
            reason,
            total
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Remove one of a member's warnings
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Member"] user: User,
    #[description = "Warning number"] id: i64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let remaining = warns::remove(
        &ctx.data().pool,
        id,
        user.id.get() as i64,
        guild_id.get() as i64,
    )
    .await?;

    info!("User {} removed warning #{} of {}", ctx.author().id, id, user.id);

    let embed = embeds::success_embed()
        .title("Warning Removed")
        .description(format!(
            "Warning #{} of {} removed. They have {} warning(s) left.",
            id,
            mention_user(user.id),
            remaining
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// List a member's warnings
#[poise::command(slash_command, guild_only, required_permissions = "MODERATE_MEMBERS")]
pub async fn list(
    ctx: Context<'_>,
    #[description = "Member"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let warnings = warns::list(&ctx.data().pool, user.id.get() as i64, guild_id.get() as i64).await?;

    let description = if warnings.is_empty() {
        format!("{} has no warnings.", mention_user(user.id))
    } else {
        let lines: Vec<String> = warnings
            .iter()
            .map(|w| {
                format!(
                    "**#{}** {} · by <@{}> <t:{}:R>",
                    w.id,
                    w.reason,
                    w.moderator_id,
                    w.created_at.timestamp()
                )
            })
            .collect();
        truncate(&lines.join("\n"), DESCRIPTION_MAX)
    };

    let embed = embeds::warning_embed()
        .title(format!("Warnings for {} ({})", user.name, warnings.len()))
        .thumbnail(user.face())
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
