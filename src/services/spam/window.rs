use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::mapref::one::RefMut;
use dashmap::DashMap;

use crate::constants::timeouts::{
    SPAM_BURST_SIZE, SPAM_BURST_WINDOW, SPAM_SUPPRESSION_WINDOW, SPAM_WARNING_TEXT,
    SPAM_WARNING_TTL_SECONDS,
};

/// What the caller should do with a qualifying post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Leave the post alone
    Ignore,
    /// Burst detected: delete the post and post a warning that removes itself
    DeleteAndWarn {
        warning: &'static str,
        ttl_seconds: u64,
    },
    /// Channel is cooling down after a burst: delete without comment
    DeleteSilently,
}

/// Per-channel burst history
#[derive(Debug, Default)]
pub struct ChannelSpamState {
    /// Most recent qualifying posts, oldest first. Never longer than `SPAM_BURST_SIZE`.
    recent_posts: VecDeque<(u64, Instant)>,
    /// Timestamp of the post that triggered the last burst. Not cleared on expiry.
    suppressed_until: Option<Instant>,
}

impl ChannelSpamState {
    pub fn recent_posts(&self) -> impl Iterator<Item = &(u64, Instant)> {
        self.recent_posts.iter()
    }

    pub fn len(&self) -> usize {
        self.recent_posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent_posts.is_empty()
    }

    /// Trigger time of the last burst, even if its cooldown has passed
    pub fn trigger_time(&self) -> Option<Instant> {
        self.suppressed_until
    }

    fn is_suppressed(&self, now: Instant) -> bool {
        self.suppressed_until
            .map(|trigger| now.saturating_duration_since(trigger) <= SPAM_SUPPRESSION_WINDOW)
            .unwrap_or(false)
    }

    fn push(&mut self, post_id: u64, now: Instant) {
        if self.recent_posts.len() == SPAM_BURST_SIZE {
            self.recent_posts.pop_front();
        }
        self.recent_posts.push_back((post_id, now));
    }

    fn span(&self) -> Option<Duration> {
        let (_, oldest) = self.recent_posts.front()?;
        let (_, newest) = self.recent_posts.back()?;
        Some(newest.saturating_duration_since(*oldest))
    }

    fn is_burst(&self) -> bool {
        self.recent_posts.len() == SPAM_BURST_SIZE
            && self.span().map(|s| s <= SPAM_BURST_WINDOW).unwrap_or(false)
    }
}

/// Owns the spam state of every channel that has seen a qualifying post.
///
/// Each channel's entry is locked for the whole decision, so concurrent
/// events for the same channel are evaluated one after another while other
/// channels proceed independently.
pub struct SpamWindow {
    channels: DashMap<u64, ChannelSpamState>,
}

impl SpamWindow {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Get the state for a channel, creating an empty one on first use
    pub fn get_or_create(&self, channel_id: u64) -> RefMut<'_, u64, ChannelSpamState> {
        self.channels.entry(channel_id).or_default()
    }

    /// Decide what to do with a qualifying post.
    ///
    /// `now` is the arrival time of the post. Exempt channels are rejected
    /// before the store is touched, so they never accumulate state.
    pub fn evaluate(&self, channel_id: u64, post_id: u64, now: Instant, is_exempt: bool) -> Decision {
        if is_exempt {
            return Decision::Ignore;
        }

        let mut state = self.get_or_create(channel_id);

        if state.is_suppressed(now) {
            return Decision::DeleteSilently;
        }

        state.push(post_id, now);

        if state.is_burst() {
            state.suppressed_until = Some(now);
            return Decision::DeleteAndWarn {
                warning: SPAM_WARNING_TEXT,
                ttl_seconds: SPAM_WARNING_TTL_SECONDS,
            };
        }

        Decision::Ignore
    }

    /// Number of channels holding state
    pub fn tracked_channels(&self) -> usize {
        self.channels.len()
    }

    /// Drop the state of a deleted channel
    pub fn cleanup_channel(&self, channel_id: u64) {
        self.channels.remove(&channel_id);
    }
}

impl Default for SpamWindow {
    fn default() -> Self {
        Self::new()
    }
}
