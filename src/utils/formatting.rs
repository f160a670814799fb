use serenity::all::UserId;

/// Format a user mention
pub fn mention_user(user_id: UserId) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Strip spoiler markers from message content
pub fn remove_spoilers(content: &str) -> String {
    content.replace("||", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long quote indeed", 10), "a very ...");
        assert_eq!(truncate("┇┇┇┇┇", 4), "┇...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_mentions() {
        assert_eq!(mention_user(UserId::new(42)), "<@42>");
        assert_eq!(mention_channel(7), "<#7>");
    }

    #[test]
    fn test_remove_spoilers() {
        assert_eq!(remove_spoilers("the ||butler|| did it"), "the butler did it");
    }
}
