use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serenity::all::{Context, CreateMessage, CreateThread, Message};
use tracing::{info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::timeouts::QUOTE_REJECTION_TTL_SECONDS;
use crate::services::spam::gif_filter::spawn_transient_message;
use crate::utils::formatting::{mention_user, truncate};

/// `"quote text" - @author`
static QUOTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"\s*(.+?)\s*"\s*-?\s*@?([\w\s@#<>]+)$"#).expect("quote pattern compiles")
});

/// Discord limit for thread names
const THREAD_NAME_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Parse a quote post, `None` if it isn't one
pub fn parse_quote(content: &str) -> Option<Quote> {
    let caps = QUOTE_PATTERN.captures(content)?;
    Some(Quote {
        text: caps.get(1)?.as_str().to_string(),
        author: caps.get(2)?.as_str().trim().to_string(),
    })
}

/// Enforce the quotes-only channel: open a thread for quotes, remove anything else
pub async fn handle_quote_message(
    ctx: &Context,
    _data: &Arc<Data>,
    message: &Message,
) -> Result<(), Error> {
    match parse_quote(&message.content) {
        Some(quote) => {
            let name = truncate(&quote.text, THREAD_NAME_MAX);
            let thread = message
                .channel_id
                .create_thread_from_message(ctx, message.id, CreateThread::new(name))
                .await?;

            thread
                .send_message(
                    ctx,
                    CreateMessage::new().content(format!("Quote thread for: \"{}\"", quote.text)),
                )
                .await?;

            info!(
                "Opened quote thread {} for message {} by {}",
                thread.id, message.id, message.author.id
            );
        }
        None => {
            spawn_transient_message(
                ctx.http.clone(),
                message.channel_id,
                format!("{}, only quotes are allowed here.", mention_user(message.author.id)),
                QUOTE_REJECTION_TTL_SECONDS,
            );

            if let Err(e) = message.delete(ctx).await {
                warn!("Failed to delete non-quote message {}: {:?}", message.id, e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let quote = parse_quote(r#""I was never there" - @edgers1"#).expect("is a quote");
        assert_eq!(quote.text, "I was never there");
        assert_eq!(quote.author, "edgers1");

        let quote = parse_quote(r#""  gg go next  " <@1234567890>"#).expect("is a quote");
        assert_eq!(quote.text, "gg go next");
        assert_eq!(quote.author, "<@1234567890>");
    }

    #[test]
    fn test_rejects_non_quotes() {
        assert_eq!(parse_quote("just chatting"), None);
        assert_eq!(parse_quote(r#""no author""#), None);
        assert_eq!(parse_quote(r#"prefix "quote" - me"#), None);
    }
}
