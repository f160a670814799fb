use std::collections::BTreeSet;

use sqlx::SqlitePool;

use crate::bot::error::Error;
use crate::constants::roles::{TEAM_NAME_PREFIX, TEAM_ROLE_PREFIX, TEAM_ROLE_SUFFIXES};
use crate::db::models::Team;
use crate::db::queries::team;

/// Capitalize every word and make sure the name carries the `Alternate ` prefix
pub fn standardize_team_name(team_name: &str) -> String {
    let name = team_name
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.starts_with(TEAM_NAME_PREFIX) {
        name
    } else {
        format!("{}{}", TEAM_NAME_PREFIX, name)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Team a member belongs to according to roles like `OW | Phoenix Manager`.
///
/// Returns `None` when the roles point at no team or at more than one.
pub fn affiliated_team<S: AsRef<str>>(role_names: &[S]) -> Option<String> {
    let teams: BTreeSet<String> = role_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.starts_with(TEAM_ROLE_PREFIX))
        .filter_map(|name| {
            let (_, rest) = name.split_once('|')?;
            let words: Vec<&str> = rest.split_whitespace().collect();
            let (suffix, team_words) = words.split_last()?;
            if !TEAM_ROLE_SUFFIXES.contains(suffix) || team_words.is_empty() {
                return None;
            }
            Some(team_words.join(" "))
        })
        .collect();

    if teams.len() == 1 {
        teams.into_iter().next().map(|t| standardize_team_name(&t))
    } else {
        None
    }
}

/// Resolve the team a command targets: the explicit argument if given,
/// otherwise the caller's team role, otherwise the one team they are signed
/// to as manager. The team must exist.
pub async fn resolve_team<S: AsRef<str>>(
    pool: &SqlitePool,
    explicit: Option<&str>,
    role_names: &[S],
    caller_id: i64,
) -> Result<Team, Error> {
    let name = match explicit {
        Some(name) => standardize_team_name(name),
        None => match affiliated_team(role_names) {
            Some(name) => name,
            None => {
                let mut managed = team::get_managed(pool, caller_id).await?;
                if managed.len() != 1 {
                    return Err(Error::custom(
                        "Please specify your team. You are affiliated with none or multiple teams.",
                    ));
                }
                managed.remove(0)
            }
        },
    };

    team::get(pool, &name)
        .await?
        .ok_or(Error::TeamNotFound(name))
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::db::pool::test_pool;
    use crate::db::queries::player;

    #[test]
    fn test_standardize_team_name() {
        assert_eq!(standardize_team_name("phoenix"), "Alternate Phoenix");
        assert_eq!(standardize_team_name("  red   DRAGONS "), "Alternate Red Dragons");
        assert_eq!(standardize_team_name("alternate phoenix"), "Alternate Phoenix");
        assert_eq!(standardize_team_name("Alternate Phoenix"), "Alternate Phoenix");
    }

    #[test]
    fn test_single_affiliation() {
        let roles = ["@everyone", "OW | Phoenix Manager", "Server Booster"];
        assert_eq!(affiliated_team(&roles), Some("Alternate Phoenix".to_string()));
    }

    #[test]
    fn test_same_team_through_multiple_roles() {
        let roles = ["OW | Red Dragons Coach", "OW | Red Dragons Captain"];
        assert_eq!(affiliated_team(&roles), Some("Alternate Red Dragons".to_string()));
    }

    #[test]
    fn test_ambiguous_or_missing_affiliation() {
        assert_eq!(affiliated_team(&["OW | Phoenix Manager", "OW | Ember Coach"]), None);
        assert_eq!(affiliated_team(&["OW | Phoenix Player", "Member"]), None);
        assert_eq!(affiliated_team(&["OW | Coach"]), None);
        assert_eq!(affiliated_team::<&str>(&[]), None);
    }

    #[tokio::test]
    async fn test_resolve_team() {
        let pool = test_pool().await;
        assert_ok!(team::create(&pool, "Alternate Phoenix", "#FF5733", "a.png", None).await);

        let from_roles = assert_ok!(resolve_team(&pool, None, &["OW | Phoenix Manager"], 1).await);
        assert_eq!(from_roles.team_name, "Alternate Phoenix");

        let explicit = assert_ok!(resolve_team::<&str>(&pool, Some("phoenix"), &[], 1).await);
        assert_eq!(explicit.team_name, "Alternate Phoenix");

        assert!(matches!(
            resolve_team::<&str>(&pool, Some("ghost"), &[], 1).await,
            Err(Error::TeamNotFound(name)) if name == "Alternate Ghost"
        ));
        assert!(matches!(
            resolve_team::<&str>(&pool, None, &[], 1).await,
            Err(Error::Custom(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_team_from_managed_roster() {
        let pool = test_pool().await;
        assert_ok!(team::create(&pool, "Alternate Phoenix", "#FF5733", "a.png", None).await);
        assert_ok!(team::create(&pool, "Alternate Ember", "#000000", "b.png", None).await);
        assert_ok!(player::add(&pool, 7, "Alternate Phoenix", "Manager").await);

        let managed = assert_ok!(resolve_team::<&str>(&pool, None, &[], 7).await);
        assert_eq!(managed.team_name, "Alternate Phoenix");

        assert_ok!(player::add(&pool, 7, "Alternate Ember", "Manager").await);
        assert!(matches!(
            resolve_team::<&str>(&pool, None, &[], 7).await,
            Err(Error::Custom(_))
        ));
    }
}
