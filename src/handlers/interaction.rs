use std::sync::Arc;

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction, ModalInteraction,
};
use tracing::{debug, error};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::components::confirm_delete;
use crate::constants::embeds;

pub async fn handle_interaction(
    ctx: &Context,
    data: &Arc<Data>,
    interaction: &Interaction,
) -> Result<(), Error> {
    match interaction {
        Interaction::Component(component) => {
            handle_component(ctx, data, component).await?;
        }
        Interaction::Modal(modal) => {
            handle_modal(ctx, data, modal).await?;
        }
        Interaction::Command(_) => {
            debug!("Received command interaction outside poise");
        }
        _ => {
            debug!("Unhandled interaction type: {:?}", interaction.kind());
        }
    }

    Ok(())
}

async fn handle_component(
    ctx: &Context,
    data: &Arc<Data>,
    component: &ComponentInteraction,
) -> Result<(), Error> {
    let custom_id = &component.data.custom_id;
    debug!("Component interaction: {}", custom_id);

    let result = if custom_id.starts_with("teamdel_") {
        confirm_delete::handle_button(ctx, data, component).await
    } else {
        debug!("Unknown component interaction: {}", custom_id);
        Ok(())
    };

    // If handler failed, send error response
    if let Err(e) = result {
        error!("Component interaction error for {}: {:?}", custom_id, e);
        let _ = send_component_error(ctx, component, &format!("An error occurred: {}", e)).await;
    }

    Ok(())
}

async fn handle_modal(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    let custom_id = &modal.data.custom_id;
    debug!("Modal submission: {}", custom_id);

    if custom_id.starts_with("teamdel_modal_") {
        if let Err(e) = confirm_delete::handle_modal(ctx, data, modal).await {
            error!("Modal submission error for {}: {:?}", custom_id, e);
            let _ = send_modal_error(ctx, modal, &format!("An error occurred: {}", e)).await;
        }
    } else {
        debug!("Unknown modal submission: {}", custom_id);
    }

    Ok(())
}

/// Send an ephemeral error message for a component interaction
pub async fn send_component_error(
    ctx: &Context,
    component: &ComponentInteraction,
    message: &str,
) -> Result<(), Error> {
    let embed = embeds::error_embed()
        .title("Error")
        .description(message);

    component
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

/// Send an ephemeral error message for a modal interaction
pub async fn send_modal_error(
    ctx: &Context,
    modal: &ModalInteraction,
    message: &str,
) -> Result<(), Error> {
    let embed = embeds::error_embed()
        .title("Error")
        .description(message);

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
