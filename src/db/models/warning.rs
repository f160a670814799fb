use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Warning {
    /// Sequential per user and server
    pub id: i64,
    pub user_id: i64,
    pub server_id: i64,
    pub moderator_id: i64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
