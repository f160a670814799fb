use poise::serenity_prelude::Attachment;
use tracing::info;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::components::confirm_delete;
use crate::constants::embeds;
use crate::db::models::parse_hex_color;
use crate::db::queries::team::{self, TeamChanges};
use crate::services::banner;
use crate::utils::permissions::author_role_names;
use crate::utils::teams::{resolve_team, standardize_team_name};

/// Manage competitive teams
#[poise::command(
    slash_command,
    subcommands("list", "create", "edit", "delete", "status"),
    guild_only
)]
pub async fn team(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/team list`, `/team create`, `/team edit`, `/team delete`, `/team status`").await?;
    Ok(())
}

/// List every team
#[poise::command(slash_command, guild_only)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let teams = team::list(&ctx.data().pool).await?;

    let embed = if teams.is_empty() {
        embeds::standard_embed()
            .title("Teams")
            .description("No teams yet. Create one with `/team create`.")
    } else {
        let lines: Vec<String> = teams
            .iter()
            .map(|t| {
                let mut line = format!("**{}**", t.team_name);
                if let Some(rank) = &t.rank {
                    line.push_str(&format!(" ({})", rank));
                }
                if t.trialing {
                    line.push_str(" · trialing");
                }
                line
            })
            .collect();

        embeds::standard_embed()
            .title(format!("Teams ({})", teams.len()))
            .description(embeds::bullet_list(&lines))
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Create a team
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn create(
    ctx: Context<'_>,
    #[description = "Team name, \"Alternate\" is added automatically"] name: String,
    #[description = "Hex color, e.g. #FF5733"] color: String,
    #[description = "Banner image"] banner: Attachment,
    #[description = "Competitive rank"] rank: Option<String>,
) -> Result<(), Error> {
    let name = standardize_team_name(&name);

    if parse_hex_color(&color).is_none() {
        return Err(Error::InvalidOperation(format!("{} is not a hex color.", color)));
    }

    if team::get(&ctx.data().pool, &name).await?.is_some() {
        return Err(Error::InvalidOperation(format!("Team {} already exists.", name)));
    }

    ctx.defer().await?;

    let path = banner::save_banner(&ctx.data().settings.banner_dir, &name, &banner).await?;
    let created = team::create(
        &ctx.data().pool,
        &name,
        &color,
        &path.to_string_lossy(),
        rank.as_deref(),
    )
    .await?;

    info!("User {} created team {}", ctx.author().id, created.team_name);

    let embed = embeds::team_embed(&created)
        .title("Team Created")
        .description(format!("**{}** is ready for signings.", created.team_name));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Edit a team; only the supplied fields change
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Team to edit"] team: String,
    #[description = "New name"] name: Option<String>,
    #[description = "New hex color"] color: Option<String>,
    #[description = "New rank"] rank: Option<String>,
    #[description = "New banner image"] banner: Option<Attachment>,
) -> Result<(), Error> {
    let pool = &ctx.data().pool;
    let team_name = standardize_team_name(&team);
    let existing = team::get(pool, &team_name)
        .await?
        .ok_or_else(|| Error::TeamNotFound(team_name.clone()))?;

    if let Some(color) = &color {
        if parse_hex_color(color).is_none() {
            return Err(Error::InvalidOperation(format!("{} is not a hex color.", color)));
        }
    }

    let new_name = name.as_deref().map(standardize_team_name);
    if let Some(new_name) = new_name.as_deref().filter(|n| *n != team_name) {
        if team::get(pool, new_name).await?.is_some() {
            return Err(Error::InvalidOperation(format!("Team {} already exists.", new_name)));
        }
    }

    if new_name.is_none() && color.is_none() && rank.is_none() && banner.is_none() {
        return Err(Error::InvalidOperation("Nothing to change.".to_string()));
    }

    ctx.defer().await?;

    let final_name = new_name.clone().unwrap_or_else(|| team_name.clone());
    let banner_path = match &banner {
        Some(attachment) => {
            let path = banner::save_banner(&ctx.data().settings.banner_dir, &final_name, attachment).await?;
            let path = path.to_string_lossy().into_owned();
            if path != existing.banner {
                banner::remove_banner(&existing.banner).await?;
            }
            Some(path)
        }
        None => None,
    };

    let changes = TeamChanges {
        new_name: new_name.as_deref(),
        color: color.as_deref(),
        rank: rank.as_deref(),
    };

    let mut updated = team::edit(pool, &team_name, &changes)
        .await?
        .ok_or(Error::TeamNotFound(team_name))?;

    if let Some(path) = banner_path {
        team::update_banner(pool, &updated.team_name, &path).await?;
        updated.banner = path;
    }

    info!("User {} edited team {}", ctx.author().id, updated.team_name);

    let mut description = format!("**Name:** {}\n**Color:** {}", updated.team_name, updated.color);
    if let Some(rank) = &updated.rank {
        description.push_str(&format!("\n**Rank:** {}", rank));
    }

    let embed = embeds::team_embed(&updated)
        .title("Team Updated")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Delete a team and its roster
#[poise::command(slash_command, guild_only, owners_only)]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Team to delete"] team: String,
) -> Result<(), Error> {
    let team_name = standardize_team_name(&team);
    if team::get(&ctx.data().pool, &team_name).await?.is_none() {
        return Err(Error::TeamNotFound(team_name));
    }

    let embed = embeds::warning_embed()
        .title("Delete Team?")
        .description(format!(
            "This removes **{}**, its roster and its banner. You'll be asked to type the team name to confirm.",
            team_name
        ));

    ctx.send(
        poise::CreateReply::default()
            .embed(embed)
            .components(vec![confirm_delete::confirmation_buttons(ctx.author().id, &team_name)])
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Toggle whether a team is trialing
#[poise::command(
    slash_command,
    guild_only,
    check = "crate::utils::permissions::staff_only"
)]
pub async fn status(
    ctx: Context<'_>,
    #[description = "Team (defaults to the team you manage)"] team: Option<String>,
) -> Result<(), Error> {
    let pool = &ctx.data().pool;
    let roles = author_role_names(ctx).await;
    let team = resolve_team(pool, team.as_deref(), &roles, ctx.author().id.get() as i64).await?;

    let trialing = !team::get_status(pool, &team.team_name)
        .await?
        .ok_or_else(|| Error::TeamNotFound(team.team_name.clone()))?;
    team::set_status(pool, &team.team_name, trialing).await?;

    info!(
        "User {} set {} trialing={}",
        ctx.author().id, team.team_name, trialing
    );

    let description = if trialing {
        format!("**{}** is now trialing. Open roster spots are shown as trialing.", team.team_name)
    } else {
        format!("**{}** is no longer trialing.", team.team_name)
    };

    let embed = embeds::team_embed(&team)
        .title("Team Status")
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
