use std::sync::Arc;

use serenity::all::{
    ActionRowComponent, ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInputText, CreateInteractionResponse, CreateInteractionResponseMessage, CreateModal,
    InputTextStyle, ModalInteraction, UserId,
};
use tracing::info;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::timeouts::DELETE_CONFIRMATION_TTL_SECONDS;
use crate::db::queries::team;
use crate::handlers::interaction::{send_component_error, send_modal_error};
use crate::services::banner;
use crate::utils::teams::standardize_team_name;

const CONFIRM_PREFIX: &str = "teamdel_confirm_";
const CANCEL_PREFIX: &str = "teamdel_cancel_";
const MODAL_PREFIX: &str = "teamdel_modal_";
const NAME_INPUT_ID: &str = "teamdel_name";

/// Buttons for the team deletion prompt: `teamdel_{action}_{user_id}_{team}`
pub fn confirmation_buttons(requester: UserId, team_name: &str) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(format!("{}{}_{}", CONFIRM_PREFIX, requester, team_name))
            .label("Delete")
            .style(ButtonStyle::Danger),
        CreateButton::new(format!("{}{}_{}", CANCEL_PREFIX, requester, team_name))
            .label("Cancel")
            .style(ButtonStyle::Secondary),
    ])
}

/// Split `{user_id}_{team}`. Team names may themselves contain underscores.
fn parse_target(rest: &str) -> Option<(u64, &str)> {
    let (user, team_name) = rest.split_once('_')?;
    let user = user.parse().ok()?;
    if team_name.is_empty() {
        return None;
    }
    Some((user, team_name))
}

/// Whether a prompt sent at `sent_at` (unix seconds) can no longer be answered
pub fn is_expired(sent_at: i64, now: i64) -> bool {
    now - sent_at > DELETE_CONFIRMATION_TTL_SECONDS as i64
}

/// Handle the Delete / Cancel buttons
pub async fn handle_button(
    ctx: &Context,
    _data: &Arc<Data>,
    component: &ComponentInteraction,
) -> Result<(), Error> {
    let custom_id = component.data.custom_id.as_str();

    let (confirmed, rest) = if let Some(rest) = custom_id.strip_prefix(CONFIRM_PREFIX) {
        (true, rest)
    } else if let Some(rest) = custom_id.strip_prefix(CANCEL_PREFIX) {
        (false, rest)
    } else {
        send_component_error(ctx, component, "Invalid button state").await?;
        return Ok(());
    };

    let Some((requester, team_name)) = parse_target(rest) else {
        send_component_error(ctx, component, "Invalid button state").await?;
        return Ok(());
    };

    if component.user.id.get() != requester {
        send_component_error(ctx, component, "Only the person who ran the command can answer this")
            .await?;
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    if is_expired(component.message.timestamp.unix_timestamp(), now) {
        let embed = embeds::error_embed()
            .title("Confirmation Expired")
            .description("Run the command again to delete the team.");
        component
            .create_response(
                ctx,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(embed)
                        .components(vec![]),
                ),
            )
            .await?;
        return Ok(());
    }

    if !confirmed {
        let embed = embeds::standard_embed()
            .title("Deletion Cancelled")
            .description(format!("{} was not deleted.", team_name));
        component
            .create_response(
                ctx,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(embed)
                        .components(vec![]),
                ),
            )
            .await?;
        return Ok(());
    }

    let modal = CreateModal::new(format!("{}{}", MODAL_PREFIX, team_name), "Confirm Team Deletion")
        .components(vec![CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Type the team name to confirm", NAME_INPUT_ID)
                .placeholder(team_name)
                .required(true)
                .max_length(100),
        )]);

    component
        .create_response(ctx, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

/// Handle the retyped team name and delete the team if it matches
pub async fn handle_modal(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    let Some(team_name) = modal.data.custom_id.strip_prefix(MODAL_PREFIX) else {
        send_modal_error(ctx, modal, "Invalid modal state").await?;
        return Ok(());
    };

    let typed = modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == NAME_INPUT_ID => {
                input.value.clone()
            }
            _ => None,
        })
        .unwrap_or_default();

    if standardize_team_name(&typed) != team_name {
        send_modal_error(ctx, modal, "The name didn't match, nothing was deleted.").await?;
        return Ok(());
    }

    let Some(existing) = team::get(&data.pool, team_name).await? else {
        send_modal_error(ctx, modal, &format!("Team {} doesn't exist.", team_name)).await?;
        return Ok(());
    };

    team::delete(&data.pool, team_name).await?;
    banner::remove_banner(&existing.banner).await?;

    info!("User {} deleted team {}", modal.user.id, team_name);

    let embed = embeds::success_embed()
        .title("Team Deleted")
        .description(format!("{} and its roster have been deleted.", team_name));

    modal
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("42_Alternate Phoenix"), Some((42, "Alternate Phoenix")));
        assert_eq!(parse_target("42_Alternate_Snake_Case"), Some((42, "Alternate_Snake_Case")));
        assert_eq!(parse_target("42_"), None);
        assert_eq!(parse_target("abc_Alternate Phoenix"), None);
    }

    #[test]
    fn test_expiry() {
        assert!(!is_expired(1_000, 1_000));
        assert!(!is_expired(1_000, 1_020));
        assert!(is_expired(1_000, 1_021));
    }
}
