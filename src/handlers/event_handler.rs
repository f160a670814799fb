use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::{channel, interaction, message};
use crate::services::tryout::tracker;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!("Message handler error: {:?}", e);
            }
        }

        FullEvent::ChannelCreate { channel } => {
            let ctx = ctx.clone();
            let channel = channel.clone();
            let prefix = data.settings.channel_prefix.clone();
            // The rename waits a moment, don't hold up the event loop for it
            tokio::spawn(async move {
                if let Err(e) = channel::handle_channel_create(&ctx, &channel, &prefix).await {
                    error!("Failed to rename channel {}: {:?}", channel.id, e);
                }
            });
        }

        FullEvent::ChannelDelete { channel, .. } => {
            data.spam_window.cleanup_channel(channel.id.get());
            debug!("Channel {} deleted, dropped its spam state", channel.id);
        }

        FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = tracker::handle_member_join(ctx, data, new_member).await {
                error!(
                    "Failed to check tryout invites for {}: {:?}",
                    new_member.user.id, e
                );
            }
        }

        FullEvent::InviteCreate { data: invite } => {
            if let Some(guild_id) = invite.guild_id {
                data.record_invite(guild_id.get(), invite.code.clone(), invite.uses);
                debug!("Cached new invite {} in guild {}", invite.code, guild_id);
            }
        }

        FullEvent::InteractionCreate { interaction } => {
            // Slash commands go through poise, only components and modals land here
            match interaction {
                serenity::Interaction::Component(_) | serenity::Interaction::Modal(_) => {
                    if let Err(e) = interaction::handle_interaction(ctx, data, interaction).await {
                        error!("Component/Modal interaction handler error: {:?}", e);
                    }
                }
                _ => {}
            }
        }

        _ => {}
    }

    Ok(())
}
