use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use sqlx::SqlitePool;

use crate::config::Settings;
use crate::services::spam::window::SpamWindow;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: SqlitePool,
    pub settings: Settings,
    /// Per-channel GIF spam state
    pub spam_window: SpamWindow,
    /// Channels skipped by the GIF spam filter (mirrors the excluded_channels table)
    pub excluded_channels: DashSet<u64>,
    /// Guild id -> (invite code -> use count), refreshed on every member join
    pub invite_uses: DashMap<u64, HashMap<String, u64>>,
}

impl Data {
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        Self {
            pool,
            settings,
            spam_window: SpamWindow::new(),
            excluded_channels: DashSet::new(),
            invite_uses: DashMap::new(),
        }
    }

    /// Check if a channel is skipped by the spam filter
    pub fn is_channel_excluded(&self, channel_id: u64) -> bool {
        self.excluded_channels.contains(&channel_id)
    }

    /// Replace the cached invite use counts of a guild
    pub fn replace_invite_uses(&self, guild_id: u64, uses: HashMap<String, u64>) {
        self.invite_uses.insert(guild_id, uses);
    }

    /// Remember a single invite, e.g. one the bot just created
    pub fn record_invite(&self, guild_id: u64, code: String, uses: u64) {
        self.invite_uses.entry(guild_id).or_default().insert(code, uses);
    }

    /// Copy of the cached invite use counts of a guild
    pub fn invite_uses_snapshot(&self, guild_id: u64) -> HashMap<String, u64> {
        self.invite_uses
            .get(&guild_id)
            .map(|uses| uses.clone())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("spam_channels", &self.spam_window.tracked_channels())
            .field("excluded_channels", &self.excluded_channels.len())
            .field("invite_guilds", &self.invite_uses.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
