use chrono::Utc;
use sqlx::SqlitePool;

/// Exclude a channel from the GIF spam filter. Returns false if it already was.
pub async fn add(pool: &SqlitePool, channel_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO excluded_channels (channel_id, excluded_at)
        VALUES (?, ?)
        ON CONFLICT (channel_id) DO NOTHING
        "#
    )
    .bind(channel_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Put a channel back under the filter. Returns false if it wasn't excluded.
pub async fn remove(pool: &SqlitePool, channel_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM excluded_channels WHERE channel_id = ?")
        .bind(channel_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT channel_id FROM excluded_channels")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn test_exclude_include() {
        let pool = test_pool().await;

        assert!(assert_ok!(add(&pool, 10).await));
        assert!(!assert_ok!(add(&pool, 10).await));
        assert_ok!(add(&pool, 11).await);

        let mut channels = assert_ok!(list(&pool).await);
        channels.sort();
        assert_eq!(channels, vec![10, 11]);

        assert!(assert_ok!(remove(&pool, 10).await));
        assert!(!assert_ok!(remove(&pool, 10).await));
        assert_eq!(assert_ok!(list(&pool).await), vec![11]);
    }
}
