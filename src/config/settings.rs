use std::env;
use std::path::PathBuf;

/// Default SQLite database, created next to the binary on first run
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";

/// Default directory for team banner images
pub const DEFAULT_BANNER_DIR: &str = "graphics";

/// Default prefix enforced on new channel names
pub const DEFAULT_CHANNEL_PREFIX: &str = "┇";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    pub guild_id: Option<u64>,
    /// Channel where only quotes are allowed
    pub quote_channel_id: Option<u64>,
    /// Role granted to members who join through a tryout invite
    pub tryout_role_id: Option<u64>,
    /// Presence lines rotated every minute
    pub statuses: Vec<String>,
    pub banner_dir: PathBuf,
    pub channel_prefix: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let guild_id = parse_id("GUILD_ID")?;
        let quote_channel_id = parse_id("QUOTE_CHANNEL_ID")?;
        let tryout_role_id = parse_id("TRYOUT_ROLE_ID")?;

        let statuses = env::var("STATUSES")
            .map(|s| parse_statuses(&s))
            .unwrap_or_default();

        let banner_dir = env::var("BANNER_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BANNER_DIR.to_string())
            .into();

        let channel_prefix = env::var("CHANNEL_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CHANNEL_PREFIX.to_string());

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            quote_channel_id,
            tryout_role_id,
            statuses,
            banner_dir,
            channel_prefix,
        })
    }
}

/// Read an optional snowflake. A set but malformed value is an error.
fn parse_id(var: &str) -> Result<Option<u64>, String> {
    match env::var(var) {
        Ok(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("{} must be a numeric Discord ID, got {:?}", var, s)),
        _ => Ok(None),
    }
}

/// Split a `;`-separated list of presence lines
pub fn parse_statuses(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statuses() {
        assert_eq!(
            parse_statuses("with rosters; scrims ;;Overwatch 2"),
            vec!["with rosters", "scrims", "Overwatch 2"]
        );
        assert!(parse_statuses("  ;  ").is_empty());
    }
}
