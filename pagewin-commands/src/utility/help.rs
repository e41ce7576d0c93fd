use std::sync::Arc;

use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::{COMMANDS, CommandMeta};
use pagewin_core::Context;
use pagewin_utils::pagination::{
    ButtonValidation, JUMP_PAGE_INPUT, ModalKind, ModalValidation, PageAction, Session,
    build_paginated_view, clamp_page, modal_value, page_item_range, parse_one_based_page,
    resolve_modal_target_page, respond_ephemeral_message, respond_jump_modal,
    send_paginated_message, total_pages, update_paginated_interaction_message,
    validate_button_interaction, validate_modal_interaction,
};

pub const COMMAND: &str = "help";

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page]",
};

const HELP_COMMANDS_PER_PAGE: usize = 10;
const HELP_TITLE: &str = "Available Commands";

/// Render one page of the command catalog.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let commands = sorted_commands();

    let Some(requested_page) = parse_one_based_page(arg1) else {
        let usage = format!("Usage: `{}` (page starts at 1)", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);
    if requested_page > total {
        let out = page_out_of_range_message(requested_page, total);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let session = Session::new(COMMAND, msg.author.id.get(), ctx.config.session_timeout_secs);
    let (embed, components) = build_paginated_view(
        &session,
        HELP_TITLE,
        help_page_description(&commands, requested_page),
        requested_page,
        total,
        None,
    )?;

    send_paginated_message(
        Arc::clone(&ctx.http),
        msg.channel_id,
        embed,
        components,
        ctx.config.session_timeout_secs,
    )
    .await
}

/// Handle navigation buttons and jump-modal submits for the `help` command.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let commands = sorted_commands();
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);

    let (actor_id, target_page) =
        match validate_button_interaction(http, &interaction, COMMAND).await? {
            ButtonValidation::HandledInvalid => return Ok(true),
            ButtonValidation::Valid {
                actor_user_id,
                token,
            } => {
                if token.action == PageAction::Jump {
                    let modal = token.session().modal(ModalKind::Jump, token.page, total);
                    respond_jump_modal(http, &interaction, &modal).await?;
                    return Ok(true);
                }
                (actor_user_id, clamp_page(token.page, total))
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
                        (
                            actor_user_id,
                            resolve_modal_target_page(entered, total, token.total_pages),
                        )
                    }
                }
            }
        };

    let session = Session::new(COMMAND, actor_id, ctx.config.session_timeout_secs);
    let (embed, components) = build_paginated_view(
        &session,
        HELP_TITLE,
        help_page_description(&commands, target_page),
        target_page,
        total,
        None,
    )?;

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

fn page_out_of_range_message(requested_page: usize, total: usize) -> String {
    format!("Page {requested_page} does not exist. Available pages: 1-{total}.")
}

/// Commands on `page`, grouped under bold category headers.
fn help_page_description(commands: &[&CommandMeta], page: usize) -> String {
    let range = page_item_range(commands.len(), HELP_COMMANDS_PER_PAGE, page);
    let mut out = String::new();
    let mut current_category = None;

    for command in &commands[range] {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", command.category));
            current_category = Some(command.category);
        }
        out.push_str(&format!("`{}` - {}\n", command.usage, command.desc));
    }

    out.trim_end().to_owned()
}

fn sorted_commands() -> Vec<&'static CommandMeta> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });
    commands
}
