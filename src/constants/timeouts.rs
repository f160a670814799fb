use std::time::Duration;

/// GIF spam suppression
pub const SPAM_BURST_SIZE: usize = 3; // Qualifying posts that make up a burst
pub const SPAM_BURST_WINDOW: Duration = Duration::from_secs(10); // Max span between first and last post of a burst
pub const SPAM_SUPPRESSION_WINDOW: Duration = Duration::from_secs(15); // Cooldown after a burst, anchored on the trigger

/// Warning posted when a burst is detected
pub const SPAM_WARNING_TEXT: &str = "No GIF spamming, please!";
pub const SPAM_WARNING_TTL_SECONDS: u64 = 16;

/// Link fragment that marks a post as a GIF share
pub const GIF_LINK_PATTERN: &str = "tenor.com/view/";

/// Quote channel rejection notice lifetime
pub const QUOTE_REJECTION_TTL_SECONDS: u64 = 5;

/// Delay before renaming a freshly created channel
pub const CHANNEL_RENAME_DELAY: Duration = Duration::from_secs(1);

/// Tryout invites
pub const TRYOUT_INVITE_MAX_AGE_SECONDS: u32 = 24 * 60 * 60;
pub const TRYOUT_CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Presence rotation
pub const STATUS_ROTATION_INTERVAL: Duration = Duration::from_secs(60);

/// Team deletion confirmation lifetime
pub const DELETE_CONFIRMATION_TTL_SECONDS: u64 = 20;

/// Format duration for display
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs < 60 {
        format!("{} second{}", total_secs, if total_secs == 1 { "" } else { "s" })
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        format!("{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if total_secs < 86400 {
        let hours = total_secs / 3600;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = total_secs / 86400;
        format!("{} day{}", days, if days == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(1)), "1 second");
        assert_eq!(format_duration(Duration::from_secs(15)), "15 seconds");
        assert_eq!(format_duration(Duration::from_secs(600)), "10 minutes");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1 hour");
        assert_eq!(format_duration(Duration::from_secs(86400)), "1 day");
    }
}
