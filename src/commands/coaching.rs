use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::services::coaching;
use crate::utils::permissions::author_role_names;
use crate::utils::teams::resolve_team;

/// Coaching threads
#[poise::command(
    slash_command,
    subcommands("create"),
    guild_only,
    check = "crate::utils::permissions::staff_only"
)]
pub async fn thread(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use `/thread create` to open coaching threads.").await?;
    Ok(())
}

/// Open private 1 on 1 coaching threads in this channel
#[poise::command(
    slash_command,
    guild_only,
    check = "crate::utils::permissions::staff_only"
)]
pub async fn create(
    ctx: Context<'_>,
    #[description = "Only open a thread for this member"] member: Option<User>,
    #[description = "Team (defaults to the team you manage)"] team: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    ctx.defer_ephemeral().await?;

    let roles = author_role_names(ctx).await;
    let team = resolve_team(
        &ctx.data().pool,
        team.as_deref(),
        &roles,
        ctx.author().id.get() as i64,
    )
    .await?;

    let summary = coaching::create_coaching_threads(
        ctx.serenity_context(),
        &ctx.data().pool,
        guild_id,
        ctx.channel_id(),
        &team,
        member.as_ref(),
    )
    .await?;

    let mut description = format!("Created **{}** coaching thread(s) for {}.", summary.created, team.team_name);
    if summary.skipped_existing > 0 {
        description.push_str(&format!("\nSkipped {} that already have one.", summary.skipped_existing));
    }
    if summary.skipped_missing > 0 {
        description.push_str(&format!("\nSkipped {} who left the server.", summary.skipped_missing));
    }

    let embed = embeds::team_embed(&team)
        .title("Coaching Threads")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
