use poise::serenity_prelude::{CreateAttachment, User};
use tracing::{info, warn};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::roles::PlayerRole;
use crate::db::queries::{player, team};
use crate::services::roster;
use crate::utils::formatting::mention_user;
use crate::utils::teams::standardize_team_name;

/// Manage team rosters
#[poise::command(
    slash_command,
    subcommands("sign", "release", "edit", "roster"),
    guild_only,
    owners_only
)]
pub async fn player(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/player sign`, `/player release`, `/player edit`, `/player roster`").await?;
    Ok(())
}

/// Sign a member to a team
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn sign(
    ctx: Context<'_>,
    #[description = "Member to sign"] member: User,
    #[description = "Team to sign to"] team: String,
    #[description = "Role on the team"] role: PlayerRole,
) -> Result<(), Error> {
    let pool = &ctx.data().pool;

    if let Some(existing) = player::get(pool, member.id.get() as i64).await? {
        return Err(Error::InvalidOperation(format!(
            "{} is already on the roster of {}.",
            mention_user(member.id),
            existing.team_name
        )));
    }

    let team_name = standardize_team_name(&team);
    let team = team::get(pool, &team_name)
        .await?
        .ok_or(Error::TeamNotFound(team_name))?;

    player::add(pool, member.id.get() as i64, &team.team_name, role.as_str()).await?;

    info!(
        "User {} signed {} to {} as {}",
        ctx.author().id, member.id, team.team_name, role
    );

    let embed = embeds::team_embed(&team)
        .title("Player Signed")
        .description(format!(
            "{} joined **{}** as **{}**.",
            mention_user(member.id),
            team.team_name,
            role
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Release a member from every roster
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn release(
    ctx: Context<'_>,
    #[description = "Member to release"] member: User,
) -> Result<(), Error> {
    let removed = player::delete(&ctx.data().pool, member.id.get() as i64, None, None).await?;
    if removed == 0 {
        return Err(Error::PlayerNotFound(member.id.get()));
    }

    info!("User {} released {}", ctx.author().id, member.id);

    let embed = embeds::success_embed()
        .title("Player Released")
        .description(format!("{} has been released.", mention_user(member.id)));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Change a member's role on their team
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Member to edit"] member: User,
    #[description = "New role"] new_role: PlayerRole,
) -> Result<(), Error> {
    let changed = player::edit(
        &ctx.data().pool,
        member.id.get() as i64,
        None,
        Some(new_role.as_str()),
    )
    .await?;

    if changed == 0 {
        return Err(Error::PlayerNotFound(member.id.get()));
    }

    info!("User {} moved {} to {}", ctx.author().id, member.id, new_role);

    let embed = embeds::success_embed()
        .title("Player Updated")
        .description(format!("{} is now **{}**.", mention_user(member.id), new_role));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Post a team's roster
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn roster(
    ctx: Context<'_>,
    #[description = "Team to show"] team: String,
) -> Result<(), Error> {
    let pool = &ctx.data().pool;
    let team_name = standardize_team_name(&team);
    let team = team::get(pool, &team_name)
        .await?
        .ok_or(Error::TeamNotFound(team_name))?;

    let players = player::list_by_team(pool, &team.team_name).await?;
    let sections = roster::roster_sections(&players, team.trialing);

    let mut embed = embeds::team_embed(&team).title(&team.team_name);
    if let Some(rank) = &team.rank {
        embed = embed.description(format!("**Rank:** {}", rank));
    }

    if sections.is_empty() {
        embed = embed.field("Roster", "Nobody signed yet.", false);
    }
    for (section, lines) in &sections {
        embed = embed.field(section.title(), lines.join("\n"), false);
    }

    let mut reply = poise::CreateReply::default();

    match CreateAttachment::path(&team.banner).await {
        Ok(attachment) => {
            embed = embed.image(format!("attachment://{}", attachment.filename));
            reply = reply.attachment(attachment);
        }
        Err(e) => {
            warn!("Banner for {} unavailable: {:?}", team.team_name, e);
        }
    }

    ctx.send(reply.embed(embed)).await?;
    Ok(())
}
