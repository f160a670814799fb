use serenity::all::{Cache, GuildId, RoleId};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::roles::STAFF_ROLES;

/// Resolve role ids to names through the guild cache
pub fn role_names(cache: &Cache, guild_id: GuildId, role_ids: &[RoleId]) -> Vec<String> {
    cache
        .guild(guild_id)
        .map(|guild| {
            role_ids
                .iter()
                .filter_map(|id| guild.roles.get(id).map(|r| r.name.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Role names of the member who invoked the command
pub async fn author_role_names(ctx: Context<'_>) -> Vec<String> {
    let Some(guild_id) = ctx.guild_id() else {
        return Vec::new();
    };

    match ctx.author_member().await {
        Some(member) => role_names(&ctx.serenity_context().cache, guild_id, &member.roles),
        None => Vec::new(),
    }
}

/// True if any of the member's role names is in `allowed`
pub fn has_any_role<S: AsRef<str>>(role_names: &[S], allowed: &[&str]) -> bool {
    role_names.iter().any(|name| allowed.contains(&name.as_ref()))
}

/// Command check: caller holds a staff role or owns the bot
pub async fn staff_only(ctx: Context<'_>) -> Result<bool, Error> {
    if ctx.framework().options.owners.contains(&ctx.author().id) {
        return Ok(true);
    }

    let roles = author_role_names(ctx).await;
    Ok(has_any_role(&roles, STAFF_ROLES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_role() {
        assert!(has_any_role(&["Member", "OW | Coach"], STAFF_ROLES));
        assert!(has_any_role(&["Technician Team".to_string()], STAFF_ROLES));
        assert!(!has_any_role(&["Member", "OW | Phoenix Manager"], STAFF_ROLES));
        assert!(!has_any_role::<&str>(&[], STAFF_ROLES));
    }
}
