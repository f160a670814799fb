use crate::constants::roles::PlayerRole;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Player {
    pub player_id: i64,
    pub team_name: String,
    pub role: String,
}

impl Player {
    /// Parsed roster role, `None` if the stored value is unknown
    pub fn role(&self) -> Option<PlayerRole> {
        self.role.parse().ok()
    }

    pub fn is_staff(&self) -> bool {
        self.role().map(|r| r.is_staff()).unwrap_or(false)
    }
}
