use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::Team;

/// Fields of a team that `edit` may change. `None` leaves the column as is.
#[derive(Debug, Default, Clone)]
pub struct TeamChanges<'a> {
    pub new_name: Option<&'a str>,
    pub color: Option<&'a str>,
    pub rank: Option<&'a str>,
}

impl TeamChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none() && self.color.is_none() && self.rank.is_none()
    }
}

pub async fn create(
    pool: &SqlitePool,
    team_name: &str,
    color: &str,
    banner: &str,
    rank: Option<&str>,
) -> Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (team_name, color, banner, rank)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#
    )
    .bind(team_name)
    .bind(color)
    .bind(banner)
    .bind(rank)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &SqlitePool, team_name: &str) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE team_name = ?")
        .bind(team_name)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY team_name")
        .fetch_all(pool)
        .await
}

/// Delete a team and its roster. Returns true if the team existed.
pub async fn delete(pool: &SqlitePool, team_name: &str) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM players WHERE team_name = ?")
        .bind(team_name)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM teams WHERE team_name = ?")
        .bind(team_name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Update only the supplied fields. A rename carries the roster along.
/// Banners change through `update_banner`.
pub async fn edit(
    pool: &SqlitePool,
    team_name: &str,
    changes: &TeamChanges<'_>,
) -> Result<Option<Team>, sqlx::Error> {
    if changes.is_empty() {
        return get(pool, team_name).await;
    }

    let mut tx = pool.begin().await?;

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE teams SET ");
    let mut fields = query.separated(", ");
    if let Some(new_name) = changes.new_name {
        fields.push("team_name = ").push_bind_unseparated(new_name);
    }
    if let Some(color) = changes.color {
        fields.push("color = ").push_bind_unseparated(color);
    }
    if let Some(rank) = changes.rank {
        fields.push("rank = ").push_bind_unseparated(rank);
    }
    query.push(" WHERE team_name = ").push_bind(team_name);
    query.push(" RETURNING *");

    let updated = query
        .build_query_as::<Team>()
        .fetch_optional(&mut *tx)
        .await?;

    if let (Some(_), Some(new_name)) = (&updated, changes.new_name) {
        sqlx::query("UPDATE players SET team_name = ? WHERE team_name = ?")
            .bind(new_name)
            .bind(team_name)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(updated)
}

pub async fn update_banner(
    pool: &SqlitePool,
    team_name: &str,
    banner: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE teams SET banner = ? WHERE team_name = ?")
        .bind(banner)
        .bind(team_name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Whether the team is trialing, `None` if it doesn't exist
pub async fn get_status(pool: &SqlitePool, team_name: &str) -> Result<Option<bool>, sqlx::Error> {
    let row: Option<(bool,)> = sqlx::query_as("SELECT trialing FROM teams WHERE team_name = ?")
        .bind(team_name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.0))
}

pub async fn set_status(
    pool: &SqlitePool,
    team_name: &str,
    trialing: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE teams SET trialing = ? WHERE team_name = ?")
        .bind(trialing)
        .bind(team_name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Teams the player is signed to as a manager
pub async fn get_managed(pool: &SqlitePool, player_id: i64) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT team_name FROM players WHERE player_id = ? AND role = 'Manager' ORDER BY team_name",
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.0).collect())
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::test_pool;
    use crate::db::queries::player;

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_pool().await;

        let team = assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "graphics/phoenix.png", Some("Masters")).await);
        assert_eq!(team.team_name, "Alternate Phoenix");
        assert!(!team.trialing);

        let fetched = assert_ok!(get(&pool, "Alternate Phoenix").await).expect("team exists");
        assert_eq!(fetched.rank.as_deref(), Some("Masters"));
        assert!(assert_ok!(get(&pool, "Alternate Nope").await).is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let pool = test_pool().await;

        assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "a.png", None).await);
        assert!(create(&pool, "Alternate Phoenix", "#000000", "b.png", None).await.is_err());
    }

    #[tokio::test]
    async fn test_edit_only_supplied_fields() {
        let pool = test_pool().await;
        assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "a.png", Some("Diamond")).await);

        let changes = TeamChanges {
            color: Some("#00FF00"),
            ..Default::default()
        };
        let team = assert_ok!(edit(&pool, "Alternate Phoenix", &changes).await).expect("team exists");

        assert_eq!(team.color, "#00FF00");
        assert_eq!(team.banner, "a.png");
        assert_eq!(team.rank.as_deref(), Some("Diamond"));
    }

    #[tokio::test]
    async fn test_rename_moves_roster() {
        let pool = test_pool().await;
        assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "a.png", None).await);
        assert_ok!(player::add(&pool, 42, "Alternate Phoenix", "Main Tank").await);

        let changes = TeamChanges {
            new_name: Some("Alternate Ember"),
            ..Default::default()
        };
        assert_ok!(edit(&pool, "Alternate Phoenix", &changes).await);

        assert!(assert_ok!(get(&pool, "Alternate Phoenix").await).is_none());
        let roster = assert_ok!(player::list_by_team(&pool, "Alternate Ember").await);
        assert_eq!(roster.len(), 1);
    }

    #[tokio::test]
    async fn test_update_banner() {
        let pool = test_pool().await;
        assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "graphics/old.png", None).await);

        assert_ok!(update_banner(&pool, "Alternate Phoenix", "graphics/alternate_phoenix.gif").await);

        let team = assert_ok!(get(&pool, "Alternate Phoenix").await).expect("team exists");
        assert_eq!(team.banner, "graphics/alternate_phoenix.gif");
    }

    #[tokio::test]
    async fn test_edit_missing_team() {
        let pool = test_pool().await;
        let changes = TeamChanges {
            rank: Some("Gold"),
            ..Default::default()
        };
        assert!(assert_ok!(edit(&pool, "Alternate Ghost", &changes).await).is_none());
    }

    #[tokio::test]
    async fn test_status_toggle() {
        let pool = test_pool().await;
        assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "a.png", None).await);

        assert_eq!(assert_ok!(get_status(&pool, "Alternate Phoenix").await), Some(false));
        assert_ok!(set_status(&pool, "Alternate Phoenix", true).await);
        assert_eq!(assert_ok!(get_status(&pool, "Alternate Phoenix").await), Some(true));
        assert_eq!(assert_ok!(get_status(&pool, "Alternate Ghost").await), None);
    }

    #[tokio::test]
    async fn test_delete_removes_roster() {
        let pool = test_pool().await;
        assert_ok!(create(&pool, "Alternate Phoenix", "#FF5733", "a.png", None).await);
        assert_ok!(player::add(&pool, 42, "Alternate Phoenix", "Main Tank").await);

        assert!(assert_ok!(delete(&pool, "Alternate Phoenix").await));
        assert!(!assert_ok!(delete(&pool, "Alternate Phoenix").await));
        assert!(assert_ok!(player::get(&pool, 42).await).is_none());
    }

    #[tokio::test]
    async fn test_managed_teams() {
        let pool = test_pool().await;
        assert_ok!(player::add(&pool, 7, "Alternate Phoenix", "Manager").await);
        assert_ok!(player::add(&pool, 7, "Alternate Ember", "Manager").await);
        assert_ok!(player::add(&pool, 7, "Alternate Ash", "Head Coach").await);

        let teams = assert_ok!(get_managed(&pool, 7).await);
        assert_eq!(teams, vec!["Alternate Ember", "Alternate Phoenix"]);
    }
}
