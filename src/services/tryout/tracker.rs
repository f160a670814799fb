use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serenity::all::{ChannelId, Context, CreateInvite, GuildId, Member, RoleId, UserId};
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::timeouts::TRYOUT_INVITE_MAX_AGE_SECONDS;
use crate::db::models::{Team, TryoutInvite};
use crate::db::queries::tryout_invite;

/// Work out which tracked tryout invite a new member came through.
///
/// `before` is the use count snapshot taken before the join and `current`
/// the counts right after. An invite whose count went up wins. Single-use
/// invites vanish once used, so failing that, the one tracked invite that
/// was alive before and is gone now is taken. Several vanished invites are
/// ambiguous and attribute nothing.
pub fn find_used_invite<'a>(
    tracked: &'a [TryoutInvite],
    before: &HashMap<String, u64>,
    current: &HashMap<String, u64>,
) -> Option<&'a TryoutInvite> {
    let increased = tracked.iter().find(|invite| {
        let previous = before
            .get(&invite.code)
            .copied()
            .unwrap_or(invite.uses.max(0) as u64);
        current
            .get(&invite.code)
            .map(|now| *now > previous)
            .unwrap_or(false)
    });

    if increased.is_some() {
        return increased;
    }

    let mut vanished = tracked
        .iter()
        .filter(|invite| before.contains_key(&invite.code) && !current.contains_key(&invite.code));

    match (vanished.next(), vanished.next()) {
        (Some(invite), None) => Some(invite),
        _ => None,
    }
}

/// Fetch the current invite use counts of a guild
async fn fetch_invite_uses(ctx: &Context, guild_id: GuildId) -> Result<HashMap<String, u64>, Error> {
    let invites = guild_id.invites(ctx).await?;
    Ok(invites
        .into_iter()
        .map(|invite| (invite.code, invite.uses))
        .collect())
}

/// Reload the invite use cache for a guild
pub async fn refresh_invite_cache(ctx: &Context, data: &Arc<Data>, guild_id: GuildId) -> Result<usize, Error> {
    let uses = fetch_invite_uses(ctx, guild_id).await?;
    let count = uses.len();
    data.replace_invite_uses(guild_id.get(), uses);
    debug!("Cached {} invites for guild {}", count, guild_id);
    Ok(count)
}

/// Create a single-use tryout invite for a team and start tracking it
pub async fn create_tryout_invite(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    channel_id: ChannelId,
    team: &Team,
    inviter_id: UserId,
) -> Result<TryoutInvite, Error> {
    let invite = channel_id
        .create_invite(
            ctx,
            CreateInvite::new()
                .max_age(TRYOUT_INVITE_MAX_AGE_SECONDS)
                .max_uses(1)
                .unique(true),
        )
        .await?;

    let expires_at = Utc::now() + Duration::seconds(TRYOUT_INVITE_MAX_AGE_SECONDS as i64);

    let record = tryout_invite::create(
        &data.pool,
        &invite.code,
        guild_id.get() as i64,
        &team.team_name,
        inviter_id.get() as i64,
        invite.uses as i64,
        expires_at,
    )
    .await?;

    data.record_invite(guild_id.get(), invite.code.clone(), invite.uses);

    info!(
        "User {} created tryout invite {} for {}",
        inviter_id, invite.code, team.team_name
    );

    Ok(record)
}

/// Attribute a member join to a tryout invite and grant the tryout role
pub async fn handle_member_join(ctx: &Context, data: &Arc<Data>, member: &Member) -> Result<(), Error> {
    let guild_id = member.guild_id;
    let before = data.invite_uses_snapshot(guild_id.get());
    let current = fetch_invite_uses(ctx, guild_id).await?;
    data.replace_invite_uses(guild_id.get(), current.clone());

    let tracked = tryout_invite::list_active(&data.pool, guild_id.get() as i64, Utc::now()).await?;
    let Some(invite) = find_used_invite(&tracked, &before, &current) else {
        debug!("Member {} joined guild {} without a tryout invite", member.user.id, guild_id);
        return Ok(());
    };

    tryout_invite::delete(&data.pool, &invite.code).await?;

    info!(
        "Member {} joined through tryout invite {} for {} (invited by {})",
        member.user.id, invite.code, invite.team_name, invite.inviter_id
    );

    if let Some(role_id) = data.settings.tryout_role_id {
        if let Err(e) = member.add_role(ctx, RoleId::new(role_id)).await {
            warn!(
                "Failed to give tryout role {} to {}: {:?}",
                role_id, member.user.id, e
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite(code: &str, uses: i64) -> TryoutInvite {
        let now = Utc::now();
        TryoutInvite {
            code: code.to_string(),
            guild_id: 1,
            team_name: "Alternate Phoenix".to_string(),
            inviter_id: 7,
            uses,
            created_at: now,
            expires_at: now + Duration::hours(24),
        }
    }

    fn uses(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(c, u)| (c.to_string(), *u)).collect()
    }

    #[test]
    fn test_increased_use_count_wins() {
        let tracked = vec![invite("aaa", 0), invite("bbb", 0)];
        let before = uses(&[("aaa", 0), ("bbb", 0), ("public", 10)]);
        let current = uses(&[("aaa", 0), ("bbb", 1), ("public", 10)]);

        let used = find_used_invite(&tracked, &before, &current).expect("attributed");
        assert_eq!(used.code, "bbb");
    }

    #[test]
    fn test_vanished_single_use_invite() {
        let tracked = vec![invite("aaa", 0), invite("bbb", 0)];
        let before = uses(&[("aaa", 0), ("bbb", 0)]);
        let current = uses(&[("bbb", 0)]);

        let used = find_used_invite(&tracked, &before, &current).expect("attributed");
        assert_eq!(used.code, "aaa");
    }

    #[test]
    fn test_join_through_public_invite() {
        let tracked = vec![invite("aaa", 0)];
        let before = uses(&[("aaa", 0), ("public", 10)]);
        let current = uses(&[("aaa", 0), ("public", 11)]);

        assert!(find_used_invite(&tracked, &before, &current).is_none());
    }

    #[test]
    fn test_several_vanished_is_ambiguous() {
        let tracked = vec![invite("aaa", 0), invite("bbb", 0)];
        let before = uses(&[("aaa", 0), ("bbb", 0)]);
        let current = HashMap::new();

        assert!(find_used_invite(&tracked, &before, &current).is_none());
    }

    #[test]
    fn test_uncached_invite_uses_stored_count() {
        // Created while the cache was cold: the stored count is the baseline
        let tracked = vec![invite("aaa", 0)];
        let before = HashMap::new();
        let current = uses(&[("aaa", 1)]);

        let used = find_used_invite(&tracked, &before, &current).expect("attributed");
        assert_eq!(used.code, "aaa");
    }
}
