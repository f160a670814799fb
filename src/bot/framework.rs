use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::bot::data::{Context, Data};
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::constants::embeds;
use crate::constants::timeouts::format_duration;
use crate::db::queries::excluded_channel;
use crate::handlers::event_handler::event_handler;
use crate::services::status;
use crate::services::tryout::{cleanup, tracker};

pub async fn run(settings: Settings, pool: SqlitePool) -> Result<(), Error> {
    let data = Arc::new(Data::new(pool, settings.clone()));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::general::ping(),
                commands::general::serverinfo(),
                commands::general::help(),
                commands::general::grab_id(),
                commands::general::remove_spoilers_menu(),
                commands::owner::exclude(),
                commands::owner::include(),
                commands::owner::say(),
                commands::owner::embed(),
                commands::team::team(),
                commands::player::player(),
                commands::coaching::thread(),
                commands::warning::warning(),
                commands::tryout::tryout(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None, // Slash commands only
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Executed /{} by {} in guild {:?}",
                        ctx.command().qualified_name,
                        ctx.author().id,
                        ctx.guild_id()
                    );
                })
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                match excluded_channel::list(&data.pool).await {
                    Ok(channels) => {
                        for channel_id in &channels {
                            data.excluded_channels.insert(*channel_id as u64);
                        }
                        info!("Loaded {} channels excluded from the spam filter", channels.len());
                    }
                    Err(e) => {
                        warn!("Failed to load excluded channels: {:?}", e);
                    }
                }

                // Invite counts are the baseline for tryout attribution
                let guild_ids: Vec<GuildId> = match data.settings.guild_id {
                    Some(guild_id) => vec![GuildId::new(guild_id)],
                    None => ready.guilds.iter().map(|g| g.id).collect(),
                };
                for guild_id in guild_ids {
                    if let Err(e) = tracker::refresh_invite_cache(ctx, &data, guild_id).await {
                        warn!("Failed to cache invites for guild {}: {:?}", guild_id, e);
                    }
                }

                cleanup::spawn_invite_cleanup(data.clone());
                status::spawn_status_rotation(ctx.clone(), data.settings.statuses.clone());

                register_commands(ctx, framework, data.settings.guild_id).await?;

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_INVITES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}

/// Register commands in the configured guild, or globally without one
async fn register_commands(
    ctx: &serenity::Context,
    framework: &poise::Framework<Arc<Data>, Error>,
    guild_id: Option<u64>,
) -> Result<(), Error> {
    let commands = &framework.options().commands;

    match guild_id {
        Some(guild_id) => {
            let guild_id = GuildId::new(guild_id);
            info!("Registering {} commands in guild {}", commands.len(), guild_id);

            // Leftover global commands would show up twice
            match ctx.http.get_global_commands().await {
                Ok(global_commands) => {
                    for cmd in &global_commands {
                        if let Err(e) = ctx.http.delete_global_command(cmd.id).await {
                            warn!("Failed to delete global command {}: {:?}", cmd.name, e);
                        } else {
                            info!("Deleted global command /{}", cmd.name);
                        }
                    }
                }
                Err(e) => {
                    warn!("Could not check for global commands: {:?}", e);
                }
            }

            if let Err(e) = poise::builtins::register_in_guild(ctx, commands, guild_id).await {
                error!("Failed to register guild commands: {:?}", e);
                error!(
                    "Make sure the bot was invited with the applications.commands scope: https://discord.com/api/oauth2/authorize?client_id={}&permissions=0&scope=bot%20applications.commands",
                    ctx.cache.current_user().id
                );
                return Err(Error::Serenity(e));
            }
        }
        None => {
            info!("Registering {} commands globally", commands.len());
            if let Err(e) = poise::builtins::register_globally(ctx, commands).await {
                error!("Failed to register commands globally: {:?}", e);
                return Err(Error::Serenity(e));
            }
            info!("Note: Global commands can take up to 1 hour to appear in all servers");
        }
    }

    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Arc<Data>, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_user_facing() {
                send_error(ctx, "Error", &error.to_string()).await;
            } else {
                error!("Command /{} failed: {:?}", ctx.command().qualified_name, error);
                send_error(ctx, "Error", "Something went wrong, please try again later.").await;
            }
        }
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            send_error(ctx, "Invalid Argument", &error.to_string()).await;
        }
        poise::FrameworkError::CooldownHit { remaining_cooldown, ctx, .. } => {
            let message = format!(
                "Slow down! You can use this command again in {}.",
                format_duration(remaining_cooldown)
            );
            send_error(ctx, "Cooldown", &message).await;
        }
        poise::FrameworkError::MissingUserPermissions { missing_permissions, ctx, .. } => {
            let message = match missing_permissions {
                Some(permissions) => format!("You are missing the permission(s) `{}` to run this command.", permissions),
                None => "You don't have the permissions to run this command.".to_string(),
            };
            send_error(ctx, "Missing Permissions", &message).await;
        }
        poise::FrameworkError::MissingBotPermissions { missing_permissions, ctx, .. } => {
            let message = format!(
                "I am missing the permission(s) `{}` to fully perform this command.",
                missing_permissions
            );
            send_error(ctx, "Missing Permissions", &message).await;
        }
        poise::FrameworkError::NotAnOwner { ctx, .. } => {
            send_error(ctx, "Not Allowed", "You are not an owner of the bot!").await;
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                error!("Check for /{} failed: {:?}", ctx.command().qualified_name, error);
            }
            send_error(ctx, "Not Allowed", "You are not allowed to use this command.").await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            // Mentions and text that looks like a prefix command
        }
        err => {
            error!("Framework error: {:?}", err);
        }
    }
}

/// Reply with an ephemeral error embed, logging if even that fails
async fn send_error(ctx: Context<'_>, title: &str, message: &str) {
    let embed = embeds::error_embed().title(title).description(message);
    if let Err(e) = ctx
        .send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await
    {
        warn!("Failed to send error reply: {:?}", e);
    }
}
