use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::models::TryoutInvite;

pub async fn create(
    pool: &SqlitePool,
    code: &str,
    guild_id: i64,
    team_name: &str,
    inviter_id: i64,
    uses: i64,
    expires_at: DateTime<Utc>,
) -> Result<TryoutInvite, sqlx::Error> {
    sqlx::query_as::<_, TryoutInvite>(
        r#"
        INSERT INTO tryout_invites (code, guild_id, team_name, inviter_id, uses, created_at, expires_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#
    )
    .bind(code)
    .bind(guild_id)
    .bind(team_name)
    .bind(inviter_id)
    .bind(uses)
    .bind(Utc::now())
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Tryout invites of a guild that haven't expired yet
pub async fn list_active(
    pool: &SqlitePool,
    guild_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<TryoutInvite>, sqlx::Error> {
    sqlx::query_as::<_, TryoutInvite>(
        "SELECT * FROM tryout_invites WHERE guild_id = ? AND expires_at > ? ORDER BY created_at",
    )
    .bind(guild_id)
    .bind(now)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, code: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tryout_invites WHERE code = ?")
        .bind(code)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove every invite past its expiry. Returns how many were removed.
pub async fn delete_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tryout_invites WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::test_pool;

    const GUILD: i64 = 1053103469172625499;

    #[tokio::test]
    async fn test_active_and_expired() {
        let pool = test_pool().await;
        let now = Utc::now();

        assert_ok!(create(&pool, "fresh", GUILD, "Alternate Phoenix", 1, 0, now + Duration::hours(24)).await);
        assert_ok!(create(&pool, "stale", GUILD, "Alternate Phoenix", 1, 0, now - Duration::minutes(1)).await);
        assert_ok!(create(&pool, "elsewhere", 42, "Alternate Ember", 1, 0, now + Duration::hours(24)).await);

        let active = assert_ok!(list_active(&pool, GUILD, now).await);
        let codes: Vec<&str> = active.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["fresh"]);

        assert_eq!(assert_ok!(delete_expired(&pool, now).await), 1);
        assert_eq!(assert_ok!(delete_expired(&pool, now).await), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let now = Utc::now();
        assert_ok!(create(&pool, "abc", GUILD, "Alternate Phoenix", 1, 0, now + Duration::hours(1)).await);

        assert!(assert_ok!(delete(&pool, "abc").await));
        assert!(!assert_ok!(delete(&pool, "abc").await));
    }
}
