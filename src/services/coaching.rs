use serenity::all::{
    AutoArchiveDuration, ChannelId, ChannelType, Context, CreateThread, GuildId, User, UserId,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::bot::error::Error;
use crate::db::models::Team;
use crate::db::queries::player;

/// Name of a member's coaching thread
pub fn thread_name(username: &str) -> String {
    format!("{} 1 on 1 coaching", username)
}

/// Result of a coaching thread run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoachingSummary {
    pub created: usize,
    pub skipped_existing: usize,
    pub skipped_missing: usize,
}

/// Open private coaching threads in `channel_id`.
///
/// With `member` set only that member gets a thread, otherwise every player
/// of the team does. Coaches and managers of the team are added to each
/// thread. Members that already have an active thread are skipped.
pub async fn create_coaching_threads(
    ctx: &Context,
    pool: &SqlitePool,
    guild_id: GuildId,
    channel_id: ChannelId,
    team: &Team,
    member: Option<&User>,
) -> Result<CoachingSummary, Error> {
    let roster = player::list_by_team(pool, &team.team_name).await?;
    let staff: Vec<UserId> = roster
        .iter()
        .filter(|p| p.is_staff())
        .map(|p| UserId::new(p.player_id as u64))
        .collect();

    let mut summary = CoachingSummary::default();

    let targets: Vec<(UserId, String)> = match member {
        Some(user) => vec![(user.id, user.name.clone())],
        None => {
            let mut targets = Vec::new();
            for p in roster.iter().filter(|p| !p.is_staff()) {
                let user_id = UserId::new(p.player_id as u64);
                match guild_id.member(ctx, user_id).await {
                    Ok(m) => targets.push((user_id, m.user.name.clone())),
                    Err(e) => {
                        debug!("Player {} not in guild, skipping: {:?}", user_id, e);
                        summary.skipped_missing += 1;
                    }
                }
            }
            targets
        }
    };

    let existing = existing_thread_names(ctx, guild_id, channel_id).await;

    for (user_id, username) in targets {
        let name = thread_name(&username);
        if existing.contains(&name) {
            summary.skipped_existing += 1;
            continue;
        }

        let thread = channel_id
            .create_thread(
                ctx,
                CreateThread::new(name)
                    .kind(ChannelType::PrivateThread)
                    .auto_archive_duration(AutoArchiveDuration::OneHour)
                    .invitable(true),
            )
            .await?;

        thread.id.add_thread_member(ctx, user_id).await?;

        for staff_id in staff.iter().filter(|id| **id != user_id) {
            if let Err(e) = thread.id.add_thread_member(ctx, *staff_id).await {
                warn!(
                    "Failed to add staff {} to coaching thread {}: {:?}",
                    staff_id, thread.id, e
                );
            }
        }

        info!(
            "Created coaching thread {} for {} ({})",
            thread.id, user_id, team.team_name
        );
        summary.created += 1;
    }

    Ok(summary)
}

/// Names of the active threads under a channel
async fn existing_thread_names(ctx: &Context, guild_id: GuildId, channel_id: ChannelId) -> Vec<String> {
    match guild_id.get_active_threads(ctx).await {
        Ok(data) => data
            .threads
            .into_iter()
            .filter(|t| t.parent_id == Some(channel_id))
            .map(|t| t.name)
            .collect(),
        Err(e) => {
            warn!("Could not list active threads in guild {}: {:?}", guild_id, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_name() {
        assert_eq!(thread_name("edgers1"), "edgers1 1 on 1 coaching");
    }
}
