use serenity::all::{Context, EditChannel, GuildChannel};
use tracing::{debug, info};

use crate::bot::error::Error;
use crate::constants::timeouts::CHANNEL_RENAME_DELAY;

/// Name with the channel prefix applied, `None` if it already has it
pub fn prefixed_name(name: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() || name.starts_with(prefix) {
        None
    } else {
        Some(format!("{}{}", prefix, name))
    }
}

/// Give newly created channels the server's naming prefix
pub async fn handle_channel_create(
    ctx: &Context,
    channel: &GuildChannel,
    prefix: &str,
) -> Result<(), Error> {
    let Some(new_name) = prefixed_name(&channel.name, prefix) else {
        debug!("Channel {} already prefixed", channel.id);
        return Ok(());
    };

    tokio::time::sleep(CHANNEL_RENAME_DELAY).await;

    channel
        .id
        .edit(ctx, EditChannel::new().name(new_name.clone()))
        .await?;

    info!("Renamed channel {} to {}", channel.id, new_name);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_name() {
        assert_eq!(prefixed_name("general", "┇").as_deref(), Some("┇general"));
        assert_eq!(prefixed_name("┇general", "┇"), None);
        assert_eq!(prefixed_name("general", ""), None);
    }
}
