use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TryoutInvite {
    pub code: String,
    pub guild_id: i64,
    pub team_name: String,
    pub inviter_id: i64,
    /// Use count when the invite was created
    pub uses: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
