//! Validation of pagination button and modal interactions.

use twilight_http::Client;
use twilight_model::application::interaction::{
    InteractionData, modal::ModalInteractionComponent,
};
use twilight_model::gateway::payload::incoming::InteractionCreate;

use super::respond::{respond_ephemeral_message, respond_rejection};
use super::token::{
    ButtonToken, ModalKind, ModalToken, TokenRejection, now_unix_secs, validate_button_token,
    validate_modal_token,
};

const UNKNOWN_ACTOR_MESSAGE: &str = "Unable to determine interaction user.";

/// Outcome of checking a button press against a command.
#[derive(Debug, Clone)]
pub enum ButtonValidation {
    /// Not a pagination button of this command.
    NotForCommand,
    /// Refused and already answered with an ephemeral message.
    HandledInvalid,
    Valid {
        actor_user_id: u64,
        token: ButtonToken,
    },
}

/// Outcome of checking a modal submit against a command.
#[derive(Debug, Clone)]
pub enum ModalValidation {
    NotForCommand,
    HandledInvalid,
    Valid {
        actor_user_id: u64,
        token: ModalToken,
        /// Submitted text inputs as `(custom_id, value)` pairs.
        values: Vec<(String, String)>,
    },
}

/// Custom ID of a button press or modal submit.
pub fn interaction_custom_id(interaction: &InteractionCreate) -> Option<&str> {
    match interaction.data.as_ref()? {
        InteractionData::MessageComponent(data) => Some(&data.custom_id),
        InteractionData::ModalSubmit(data) => Some(&data.custom_id),
        _ => None,
    }
}

/// Validate a pagination button press for the command named `base_command`.
pub async fn validate_button_interaction(
    http: &Client,
    interaction: &InteractionCreate,
    base_command: &str,
) -> anyhow::Result<ButtonValidation> {
    let Some(InteractionData::MessageComponent(component_data)) = interaction.data.as_ref() else {
        return Ok(ButtonValidation::NotForCommand);
    };

    let custom_id = &component_data.custom_id;
    let Some(preview) = ButtonToken::parse(custom_id) else {
        return Ok(ButtonValidation::NotForCommand);
    };
    if preview.base_command() != base_command {
        return Ok(ButtonValidation::NotForCommand);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_message(http, interaction, UNKNOWN_ACTOR_MESSAGE).await?;
        return Ok(ButtonValidation::HandledInvalid);
    };

    match validate_button_token(custom_id, base_command, actor_user_id, now_unix_secs()) {
        Ok(token) => Ok(ButtonValidation::Valid {
            actor_user_id,
            token,
        }),
        Err(rejection) => {
            respond_rejection(http, interaction, rejection).await?;
            Ok(ButtonValidation::HandledInvalid)
        }
    }
}

/// Validate a modal submit of `kind` for the command named `base_command`.
pub async fn validate_modal_interaction(
    http: &Client,
    interaction: &InteractionCreate,
    base_command: &str,
    kind: ModalKind,
) -> anyhow::Result<ModalValidation> {
    let Some(InteractionData::ModalSubmit(modal_data)) = interaction.data.as_ref() else {
        return Ok(ModalValidation::NotForCommand);
    };

    let custom_id = &modal_data.custom_id;
    let Some(preview) = ModalToken::parse(custom_id) else {
        return Ok(ModalValidation::NotForCommand);
    };
    if preview.base_command() != base_command || preview.kind != kind {
        return Ok(ModalValidation::NotForCommand);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_ephemeral_message(http, interaction, UNKNOWN_ACTOR_MESSAGE).await?;
        return Ok(ModalValidation::HandledInvalid);
    };

    match validate_modal_token(custom_id, base_command, kind, actor_user_id, now_unix_secs()) {
        Ok(token) => Ok(ModalValidation::Valid {
            actor_user_id,
            token,
            values: modal_text_values(&modal_data.components),
        }),
        Err(TokenRejection::WrongCommand) => Ok(ModalValidation::NotForCommand),
        Err(rejection) => {
            respond_rejection(http, interaction, rejection).await?;
            Ok(ModalValidation::HandledInvalid)
        }
    }
}

/// Look up a submitted value by text-input ID.
pub fn modal_value<'a>(values: &'a [(String, String)], custom_id: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|(id, _)| id == custom_id)
        .map(|(_, value)| value.as_str())
}

fn modal_text_values(components: &[ModalInteractionComponent]) -> Vec<(String, String)> {
    let mut values = Vec::new();
    for component in components {
        match component {
            ModalInteractionComponent::ActionRow(row) => {
                values.extend(modal_text_values(&row.components));
            }
            ModalInteractionComponent::TextInput(text_input) => {
                values.push((text_input.custom_id.clone(), text_input.value.clone()));
            }
            _ => {}
        }
    }
    values
}
