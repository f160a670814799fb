use std::sync::Arc;

use serenity::all::{Context, Message};
use tracing::error;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::quotes;
use crate::services::spam::gif_filter;

pub async fn handle_message(ctx: &Context, data: &Arc<Data>, message: &Message) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }

    // The quote channel has its own rules and skips the GIF filter
    if data.settings.quote_channel_id == Some(message.channel_id.get()) {
        if let Err(e) = quotes::handle_quote_message(ctx, data, message).await {
            error!("Quote handler error in {}: {:?}", message.channel_id, e);
        }
        return Ok(());
    }

    gif_filter::check_message(ctx, data, message);

    Ok(())
}
