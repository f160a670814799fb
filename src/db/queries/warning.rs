use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::Warning;

/// Record a warning. Ids count up per user and server.
pub async fn add(
    pool: &SqlitePool,
    user_id: i64,
    server_id: i64,
    moderator_id: i64,
    reason: &str,
) -> Result<Warning, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let last: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM warns WHERE user_id = ? AND server_id = ? ORDER BY id DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(server_id)
    .fetch_optional(&mut *tx)
    .await?;

    let next_id = last.map(|r| r.0 + 1).unwrap_or(1);

    let warning = sqlx::query_as::<_, Warning>(
        r#"
        INSERT INTO warns (id, user_id, server_id, moderator_id, reason, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#
    )
    .bind(next_id)
    .bind(user_id)
    .bind(server_id)
    .bind(moderator_id)
    .bind(reason)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(warning)
}

/// Remove a warning and return how many the user has left
pub async fn remove(
    pool: &SqlitePool,
    warn_id: i64,
    user_id: i64,
    server_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query("DELETE FROM warns WHERE id = ? AND user_id = ? AND server_id = ?")
        .bind(warn_id)
        .bind(user_id)
        .bind(server_id)
        .execute(pool)
        .await?;

    count(pool, user_id, server_id).await
}

pub async fn count(pool: &SqlitePool, user_id: i64, server_id: i64) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM warns WHERE user_id = ? AND server_id = ?")
        .bind(user_id)
        .bind(server_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

pub async fn list(
    pool: &SqlitePool,
    user_id: i64,
    server_id: i64,
) -> Result<Vec<Warning>, sqlx::Error> {
    sqlx::query_as::<_, Warning>(
        "SELECT * FROM warns WHERE user_id = ? AND server_id = ? ORDER BY id",
    )
    .bind(user_id)
    .bind(server_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::test_pool;

    const GUILD: i64 = 1053103469172625499;

    #[tokio::test]
    async fn test_ids_are_sequential_per_user() {
        let pool = test_pool().await;

        let first = assert_ok!(add(&pool, 1, GUILD, 100, "spam").await);
        let second = assert_ok!(add(&pool, 1, GUILD, 100, "more spam").await);
        let other = assert_ok!(add(&pool, 2, GUILD, 100, "rude").await);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(other.id, 1);
    }

    #[tokio::test]
    async fn test_remove_reports_remaining() {
        let pool = test_pool().await;
        assert_ok!(add(&pool, 1, GUILD, 100, "spam").await);
        assert_ok!(add(&pool, 1, GUILD, 100, "more spam").await);

        assert_eq!(assert_ok!(remove(&pool, 1, 1, GUILD).await), 1);
        assert_eq!(assert_ok!(remove(&pool, 1, 1, GUILD).await), 1);

        let remaining = assert_ok!(list(&pool, 1, GUILD).await);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].reason, "more spam");
    }

    #[tokio::test]
    async fn test_next_id_follows_highest() {
        let pool = test_pool().await;
        assert_ok!(add(&pool, 1, GUILD, 100, "a").await);
        assert_ok!(add(&pool, 1, GUILD, 100, "b").await);
        assert_ok!(remove(&pool, 1, 1, GUILD).await);

        let next = assert_ok!(add(&pool, 1, GUILD, 100, "c").await);
        assert_eq!(next.id, 3);
        assert_eq!(assert_ok!(count(&pool, 1, GUILD).await), 2);
    }
}
