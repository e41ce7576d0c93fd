use std::sync::Arc;

use twilight_model::channel::message::{component::Component, embed::Embed};
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::CommandMeta;
use pagewin_core::Context;
use pagewin_utils::code::{COMPONENT_SOURCE, SOURCE_LISTINGS, SourceListing, find_listing};
use pagewin_utils::pagination::respond::SESSION_INVALID_MESSAGE;
use pagewin_utils::pagination::token::COMMAND_PARAM_SEPARATOR;
use pagewin_utils::pagination::{
    ButtonValidation, JUMP_PAGE_INPUT, ModalKind, ModalValidation, PageAction, Session,
    build_paginated_view, clamp_page, modal_value, parse_one_based_page,
    resolve_modal_target_page, respond_ephemeral_message, respond_jump_modal,
    send_paginated_message, update_paginated_interaction_message, validate_button_interaction,
    validate_modal_interaction,
};

pub const COMMAND: &str = "source";

pub const META: CommandMeta = CommandMeta {
    name: "source",
    desc: "Show the source code behind the pagination component.",
    category: "demo",
    usage: "!source [component|controls] [page]",
};

/// Show a source listing as a paged code block.
///
/// Inputs:
/// - optional listing name (default `component`) and page: `!source [name] [page]`.
///   A lone number is read as a page of the default listing.
///
/// Error behavior:
/// - unknown listing names list the available ones.
/// - invalid or out-of-range pages return a short message.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let (listing, raw_page) = match arg1 {
        Some(raw) if raw.parse::<usize>().is_ok() => (Some(&COMPONENT_SOURCE), Some(raw)),
        Some(raw) => (find_listing(raw), arg_tail),
        None => (Some(&COMPONENT_SOURCE), None),
    };

    let Some(listing) = listing else {
        let out = unknown_listing_message(arg1.unwrap_or_default());
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    };

    let Some(requested_page) = parse_one_based_page(raw_page) else {
        let usage = format!("Usage: `{}` (page starts at 1)", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let total = listing.total_pages();
    if requested_page > total {
        let out = format!("Page {requested_page} does not exist. Available pages: 1-{total}.");
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let session = Session::new(
        command_key(listing),
        msg.author.id.get(),
        ctx.config.session_timeout_secs,
    );
    let (embed, components) = listing_view(&session, listing, requested_page)?;

    send_paginated_message(
        Arc::clone(&ctx.http),
        msg.channel_id,
        embed,
        components,
        ctx.config.session_timeout_secs,
    )
    .await
}

/// Handle navigation buttons and jump-modal submits for source listings.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;

    let (actor_id, command, target_page) =
        match validate_button_interaction(http, &interaction, COMMAND).await? {
            ButtonValidation::HandledInvalid => return Ok(true),
            ButtonValidation::Valid {
                actor_user_id,
                token,
            } => {
                if token.action == PageAction::Jump {
                    let modal =
                        token
                            .session()
                            .modal(ModalKind::Jump, token.page, token.total_pages);
                    respond_jump_modal(http, &interaction, &modal).await?;
                    return Ok(true);
                }
                (actor_user_id, token.command, token.page)
            }
            ButtonValidation::NotForCommand => {
                match validate_modal_interaction(http, &interaction, COMMAND, ModalKind::Jump)
                    .await?
                {
                    ModalValidation::NotForCommand => return Ok(false),
                    ModalValidation::HandledInvalid => return Ok(true),
                    ModalValidation::Valid {
                        actor_user_id,
                        token,
                        values,
                    } => {
                        let entered = modal_value(&values, JUMP_PAGE_INPUT)
                            .and_then(|raw| parse_one_based_page(Some(raw)));
                        let Some(entered) = entered else {
                            respond_ephemeral_message(
                                http,
                                &interaction,
                                "Please enter a valid page number.",
                            )
                            .await?;
                            return Ok(true);
                        };
                        let listing = match session_listing(&token.command) {
                            Ok(listing) => listing,
                            Err(out) => {
                                respond_ephemeral_message(http, &interaction, out).await?;
                                return Ok(true);
                            }
                        };
                        let target = resolve_modal_target_page(
                            entered,
                            listing.total_pages(),
                            token.total_pages,
                        );
                        (actor_user_id, token.command, target)
                    }
                }
            }
        };

    let listing = match session_listing(&command) {
        Ok(listing) => listing,
        Err(out) => {
            respond_ephemeral_message(http, &interaction, out).await?;
            return Ok(true);
        }
    };
    let page = clamp_page(target_page, listing.total_pages());

    let session = Session::new(command, actor_id, ctx.config.session_timeout_secs);
    let (embed, components) = listing_view(&session, listing, page)?;

    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        &interaction,
        embed,
        components,
        ctx.config.session_timeout_secs,
    )
    .await?;

    Ok(true)
}

fn listing_view(
    session: &Session,
    listing: &SourceListing,
    page: usize,
) -> anyhow::Result<(Embed, Vec<Component>)> {
    build_paginated_view(
        session,
        &format!("Source: {}", listing.name),
        listing.code_block(page),
        page,
        listing.total_pages(),
        Some(listing.path),
    )
}

fn command_key(listing: &SourceListing) -> String {
    format!("{COMMAND}{COMMAND_PARAM_SEPARATOR}{}", listing.name)
}

/// Listing behind a session's command key, or the reply for a stale control.
fn session_listing(command: &str) -> Result<&'static SourceListing, &'static str> {
    listing_from_command(command).ok_or(SESSION_INVALID_MESSAGE)
}

fn listing_from_command(command: &str) -> Option<&'static SourceListing> {
    let (base, name) = command.split_once(COMMAND_PARAM_SEPARATOR)?;
    if base != COMMAND {
        return None;
    }
    find_listing(name)
}

fn unknown_listing_message(name: &str) -> String {
    let available: Vec<String> = SOURCE_LISTINGS
        .iter()
        .map(|listing| format!("`{}`", listing.name))
        .collect();
    format!(
        "Unknown listing `{}`. Available: {}.",
        name,
        available.join(", ")
    )
}
