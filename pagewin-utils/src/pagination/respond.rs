//! Interaction responses and component cleanup for paginated messages.

use std::{
    collections::HashMap,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, warn};
use twilight_http::Client;
use twilight_model::{
    channel::message::{
        MessageFlags,
        component::{ActionRow, Component, TextInput, TextInputStyle},
        embed::Embed,
    },
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::token::{ModalToken, TokenRejection};

pub const SESSION_WRONG_USER_MESSAGE: &str =
    "These controls belong to someone else. Run the command yourself to get your own.";
pub const SESSION_EXPIRED_MESSAGE: &str = "These controls have expired. Run the command again.";
pub const SESSION_INVALID_MESSAGE: &str = "That control is no longer valid.";

/// Text-input ID of the jump modal's page field.
pub const JUMP_PAGE_INPUT: &str = "page";

/// User-facing text for a refused component token.
pub fn rejection_message(rejection: TokenRejection) -> &'static str {
    match rejection {
        TokenRejection::WrongUser => SESSION_WRONG_USER_MESSAGE,
        TokenRejection::Expired => SESSION_EXPIRED_MESSAGE,
        TokenRejection::Invalid | TokenRejection::WrongCommand => SESSION_INVALID_MESSAGE,
    }
}

/// One short text input in a modal.
#[derive(Debug, Clone)]
pub struct ModalInput {
    pub custom_id: &'static str,
    pub label: String,
    pub placeholder: Option<String>,
    /// Prefilled value.
    pub value: Option<String>,
    pub max_length: u16,
}

impl ModalInput {
    #[allow(deprecated)]
    fn into_row(self) -> Component {
        Component::ActionRow(ActionRow {
            id: None,
            components: vec![Component::TextInput(TextInput {
                id: None,
                custom_id: self.custom_id.to_owned(),
                label: Some(self.label),
                max_length: Some(self.max_length),
                min_length: Some(1),
                placeholder: self.placeholder,
                required: Some(true),
                style: TextInputStyle::Short,
                value: self.value,
            })],
        })
    }
}

async fn create_response(
    http: &Client,
    interaction: &InteractionCreate,
    kind: InteractionResponseType,
    data: InteractionResponseData,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind,
        data: Some(data),
    };
    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Edit the message a component belongs to.
pub async fn respond_update_message(
    http: &Client,
    interaction: &InteractionCreate,
    embeds: &[Embed],
    components: &[Component],
) -> anyhow::Result<()> {
    let data = InteractionResponseDataBuilder::new()
        .embeds(embeds.to_vec())
        .components(components.to_vec())
        .build();

    create_response(http, interaction, InteractionResponseType::UpdateMessage, data).await
}

/// Reply with a message only the clicking user sees.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let data = InteractionResponseDataBuilder::new()
        .content(content)
        .flags(MessageFlags::EPHEMERAL)
        .build();

    create_response(
        http,
        interaction,
        InteractionResponseType::ChannelMessageWithSource,
        data,
    )
    .await
}

pub async fn respond_rejection(
    http: &Client,
    interaction: &InteractionCreate,
    rejection: TokenRejection,
) -> anyhow::Result<()> {
    debug!(?rejection, "component interaction rejected");
    respond_ephemeral_message(http, interaction, rejection_message(rejection)).await
}

/// Open a modal of required short text inputs, one per row.
///
/// The modal's custom ID is `token`, so its submit routes back to the same
/// command and session.
pub async fn respond_text_modal(
    http: &Client,
    interaction: &InteractionCreate,
    token: &ModalToken,
    title: &str,
    inputs: &[ModalInput],
) -> anyhow::Result<()> {
    let data = InteractionResponseData {
        components: Some(inputs.iter().cloned().map(ModalInput::into_row).collect()),
        custom_id: Some(token.encode()),
        title: Some(title.to_owned()),
        ..InteractionResponseData::default()
    };

    create_response(http, interaction, InteractionResponseType::Modal, data).await
}

pub async fn respond_jump_modal(
    http: &Client,
    interaction: &InteractionCreate,
    token: &ModalToken,
) -> anyhow::Result<()> {
    let last_page = token.total_pages.max(1);
    let input = ModalInput {
        custom_id: JUMP_PAGE_INPUT,
        label: "Page".to_owned(),
        placeholder: Some(format!("1 to {last_page}")),
        value: Some(token.page.to_string()),
        max_length: 6,
    };

    respond_text_modal(http, interaction, token, "Go to page", &[input]).await
}

/// Post a new paginated message; its components are cleared once the session ends.
pub async fn send_paginated_message(
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    embed: Embed,
    components: Vec<Component>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let message = http
        .create_message(channel_id)
        .embeds(&[embed])
        .components(&components)
        .await?
        .model()
        .await?;

    if !components.is_empty() {
        schedule_component_cleanup(http, message.channel_id, message.id, timeout_secs).await;
    }

    Ok(())
}

/// Rerender the message behind a component interaction and push back its cleanup.
pub async fn update_paginated_interaction_message(
    http: Arc<Client>,
    interaction: &InteractionCreate,
    embed: Embed,
    components: Vec<Component>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    respond_update_message(&http, interaction, &[embed], &components).await?;

    let Some(message) = interaction.message.as_ref() else {
        return Ok(());
    };
    if components.is_empty() {
        cancel_component_cleanup(message.id).await;
    } else {
        schedule_component_cleanup(http, message.channel_id, message.id, timeout_secs).await;
    }

    Ok(())
}

struct PendingCleanup {
    generation: u64,
    task: JoinHandle<()>,
}

static PENDING_CLEANUPS: LazyLock<Mutex<HashMap<Id<MessageMarker>, PendingCleanup>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Strip a message's components one second before its session expires.
///
/// At most one cleanup is pending per message; scheduling again replaces it.
pub async fn schedule_component_cleanup(
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    timeout_secs: u64,
) {
    let delay = Duration::from_secs(timeout_secs.saturating_sub(1));
    let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);

    let mut pending = PENDING_CLEANUPS.lock().await;

    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let no_components: [Component; 0] = [];
        if let Err(source) = http
            .update_message(channel_id, message_id)
            .components(Some(&no_components))
            .await
        {
            warn!(?source, %message_id, "failed to clear expired components");
        }

        let mut pending = PENDING_CLEANUPS.lock().await;
        if pending
            .get(&message_id)
            .is_some_and(|entry| entry.generation == generation)
        {
            pending.remove(&message_id);
        }
    });

    if let Some(replaced) = pending.insert(message_id, PendingCleanup { generation, task }) {
        replaced.task.abort();
    }
}

async fn cancel_component_cleanup(message_id: Id<MessageMarker>) {
    if let Some(cancelled) = PENDING_CLEANUPS.lock().await.remove(&message_id) {
        cancelled.task.abort();
    }
}
