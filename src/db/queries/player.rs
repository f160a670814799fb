use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::Player;

pub async fn add(
    pool: &SqlitePool,
    player_id: i64,
    team_name: &str,
    role: &str,
) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"
        INSERT INTO players (player_id, team_name, role)
        VALUES (?, ?, ?)
        RETURNING *
        "#
    )
    .bind(player_id)
    .bind(team_name)
    .bind(role)
    .fetch_one(pool)
    .await
}

/// First roster entry of a player, if any
pub async fn get(pool: &SqlitePool, player_id: i64) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE player_id = ? LIMIT 1")
        .bind(player_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_team(pool: &SqlitePool, team_name: &str) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>("SELECT * FROM players WHERE team_name = ? ORDER BY rowid")
        .bind(team_name)
        .fetch_all(pool)
        .await
}

/// Remove a player's roster entries, optionally narrowed by role and team.
/// Returns the number of rows removed.
pub async fn delete(
    pool: &SqlitePool,
    player_id: i64,
    role: Option<&str>,
    team_name: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("DELETE FROM players WHERE player_id = ");
    query.push_bind(player_id);

    if let Some(role) = role {
        query.push(" AND role = ").push_bind(role);
    }
    if let Some(team_name) = team_name {
        query.push(" AND team_name = ").push_bind(team_name);
    }

    let result = query.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Move a player to another team and/or role. Returns the number of rows changed.
pub async fn edit(
    pool: &SqlitePool,
    player_id: i64,
    team_name: Option<&str>,
    role: Option<&str>,
) -> Result<u64, sqlx::Error> {
    if team_name.is_none() && role.is_none() {
        return Ok(0);
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE players SET ");
    let mut fields = query.separated(", ");
    if let Some(team_name) = team_name {
        fields.push("team_name = ").push_bind_unseparated(team_name);
    }
    if let Some(role) = role {
        fields.push("role = ").push_bind_unseparated(role);
    }
    query.push(" WHERE player_id = ").push_bind(player_id);

    let result = query.build().execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn test_add_and_list() {
        let pool = test_pool().await;

        assert_ok!(add(&pool, 1, "Alternate Phoenix", "Main Tank").await);
        assert_ok!(add(&pool, 2, "Alternate Phoenix", "Head Coach").await);
        assert_ok!(add(&pool, 3, "Alternate Ember", "Flex DPS").await);

        let roster = assert_ok!(list_by_team(&pool, "Alternate Phoenix").await);
        let ids: Vec<i64> = roster.iter().map(|p| p.player_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(roster[1].is_staff());
        assert!(!roster[0].is_staff());
    }

    #[tokio::test]
    async fn test_get_missing_player() {
        let pool = test_pool().await;
        assert!(assert_ok!(get(&pool, 99).await).is_none());
    }

    #[tokio::test]
    async fn test_delete_with_filters() {
        let pool = test_pool().await;
        assert_ok!(add(&pool, 1, "Alternate Phoenix", "Manager").await);
        assert_ok!(add(&pool, 1, "Alternate Ember", "Manager").await);
        assert_ok!(add(&pool, 1, "Alternate Ember", "Head Coach").await);

        assert_eq!(assert_ok!(delete(&pool, 1, Some("Manager"), Some("Alternate Ember")).await), 1);
        assert_eq!(assert_ok!(delete(&pool, 1, Some("Manager"), None).await), 1);
        assert_eq!(assert_ok!(delete(&pool, 1, None, None).await), 1);
        assert!(assert_ok!(get(&pool, 1).await).is_none());
    }

    #[tokio::test]
    async fn test_edit_role() {
        let pool = test_pool().await;
        assert_ok!(add(&pool, 1, "Alternate Phoenix", "Main Tank").await);

        assert_eq!(assert_ok!(edit(&pool, 1, None, Some("Off Tank")).await), 1);
        assert_eq!(assert_ok!(edit(&pool, 1, None, None).await), 0);

        let player = assert_ok!(get(&pool, 1).await).expect("player exists");
        assert_eq!(player.role, "Off Tank");
        assert_eq!(player.team_name, "Alternate Phoenix");
    }
}
