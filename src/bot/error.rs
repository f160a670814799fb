use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Team {0} doesn't exist.")]
    TeamNotFound(String),

    #[error("Player <@{0}> isn't on a roster.")]
    PlayerNotFound(u64),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }

    /// Whether the message is meant for the person who ran the command.
    /// Infrastructure failures are logged and replaced with a generic reply.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::TeamNotFound(_)
                | Error::PlayerNotFound(_)
                | Error::InvalidOperation(_)
                | Error::Custom(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::TeamNotFound("Alternate Ghost".to_string()).to_string(),
            "Team Alternate Ghost doesn't exist."
        );
        assert_eq!(Error::PlayerNotFound(42).to_string(), "Player <@42> isn't on a roster.");
        assert_eq!(Error::custom("nope").to_string(), "nope");
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::custom("nope").is_user_facing());
        assert!(Error::InvalidOperation("x".to_string()).is_user_facing());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_user_facing());
    }
}
