use std::sync::Arc;
use std::time::{Duration, Instant};

use serenity::all::{ChannelId, Context, CreateMessage, Http, Message, MessageId};
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::constants::timeouts::GIF_LINK_PATTERN;
use crate::services::spam::window::Decision;

/// Check if a message links a GIF
pub fn is_qualifying_post(content: &str) -> bool {
    content.contains(GIF_LINK_PATTERN)
}

/// Run the GIF spam filter on a message and carry out the resulting decision
pub fn check_message(ctx: &Context, data: &Arc<Data>, message: &Message) -> Decision {
    if !is_qualifying_post(&message.content) {
        return Decision::Ignore;
    }

    let channel_id = message.channel_id;
    let is_exempt = data.is_channel_excluded(channel_id.get());

    let decision = data.spam_window.evaluate(
        channel_id.get(),
        message.id.get(),
        Instant::now(),
        is_exempt,
    );

    match &decision {
        Decision::Ignore => {}
        Decision::DeleteSilently => {
            debug!(
                "Channel {} is cooling down, deleting GIF {} from {}",
                channel_id, message.id, message.author.id
            );
            spawn_delete(ctx.http.clone(), channel_id, message.id);
        }
        Decision::DeleteAndWarn { warning, ttl_seconds } => {
            info!(
                "GIF burst in channel {} (triggered by {}), suppressing",
                channel_id, message.author.id
            );
            spawn_delete(ctx.http.clone(), channel_id, message.id);
            spawn_transient_message(ctx.http.clone(), channel_id, *warning, *ttl_seconds);
        }
    }

    decision
}

/// Delete a post without waiting for the result
fn spawn_delete(http: Arc<Http>, channel_id: ChannelId, message_id: MessageId) {
    tokio::spawn(async move {
        if let Err(e) = channel_id.delete_message(&*http, message_id).await {
            warn!(
                "Failed to delete message {} in channel {}: {:?}",
                message_id, channel_id, e
            );
        }
    });
}

/// Post a message that deletes itself after `ttl_seconds`
pub fn spawn_transient_message(
    http: Arc<Http>,
    channel_id: ChannelId,
    text: impl Into<String>,
    ttl_seconds: u64,
) {
    let text = text.into();
    tokio::spawn(async move {
        let sent = match channel_id
            .send_message(&*http, CreateMessage::new().content(text))
            .await
        {
            Ok(m) => m,
            Err(e) => {
                warn!("Failed to send message to channel {}: {:?}", channel_id, e);
                return;
            }
        };

        tokio::time::sleep(Duration::from_secs(ttl_seconds)).await;

        if let Err(e) = sent.delete(&*http).await {
            debug!("Transient message {} already gone: {:?}", sent.id, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifying_post() {
        assert!(is_qualifying_post(
            "https://tenor.com/view/cat-dance-gif-12345"
        ));
        assert!(is_qualifying_post(
            "lol https://tenor.com/view/funny-gif-999 lol"
        ));
        assert!(!is_qualifying_post("https://tenor.com/search/cat"));
        assert!(!is_qualifying_post("https://giphy.com/gifs/cat"));
        assert!(!is_qualifying_post("just chatting"));
    }
}
