use chrono::Utc;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::timeouts::TRYOUT_INVITE_MAX_AGE_SECONDS;
use crate::db::queries::{team, tryout_invite};
use crate::services::tryout::tracker;
use crate::utils::teams::standardize_team_name;

/// Tryout invites
#[poise::command(
    slash_command,
    subcommands("invite", "list"),
    guild_only,
    check = "crate::utils::permissions::staff_only"
)]
pub async fn tryout(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/tryout invite`, `/tryout list`").await?;
    Ok(())
}

/// Create a single-use invite for someone trying out for a team
#[poise::command(
    slash_command,
    guild_only,
    check = "crate::utils::permissions::staff_only"
)]
pub async fn invite(
    ctx: Context<'_>,
    #[description = "Team the player tries out for"] team: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let team_name = standardize_team_name(&team);
    let team = team::get(&ctx.data().pool, &team_name)
        .await?
        .ok_or(Error::TeamNotFound(team_name))?;

    let record = tracker::create_tryout_invite(
        ctx.serenity_context(),
        ctx.data(),
        guild_id,
        ctx.channel_id(),
        &team,
        ctx.author().id,
    )
    .await?;

    let embed = embeds::team_embed(&team)
        .title("Tryout Invite")
        .description(format!(
            "https://discord.gg/{}\n\nSingle use, valid for {} hours. Whoever joins through it gets the tryout role for **{}**.",
            record.code,
            TRYOUT_INVITE_MAX_AGE_SECONDS / 3600,
            team.team_name
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Show pending tryout invites
#[poise::command(
    slash_command,
    guild_only,
    check = "crate::utils::permissions::staff_only"
)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let invites =
        tryout_invite::list_active(&ctx.data().pool, guild_id.get() as i64, Utc::now()).await?;

    let description = if invites.is_empty() {
        "No pending tryout invites.".to_string()
    } else {
        let lines: Vec<String> = invites
            .iter()
            .map(|i| {
                format!(
                    "`{}` **{}** by <@{}>, expires <t:{}:R>",
                    i.code,
                    i.team_name,
                    i.inviter_id,
                    i.expires_at.timestamp()
                )
            })
            .collect();
        embeds::bullet_list(&lines)
    };

    let embed = embeds::standard_embed()
        .title(format!("Pending Tryouts ({})", invites.len()))
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
