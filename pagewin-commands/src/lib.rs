pub mod demo;
pub mod utility;

use tracing::{debug, info};
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use pagewin_core::Context;
use pagewin_utils::COMMAND_PREFIX;
use pagewin_utils::pagination::{custom_id_base_command, interaction_custom_id};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InteractionRoute {
    Pagination,
    Source,
    Help,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    match custom_id_base_command(custom_id)? {
        demo::pagination::COMMAND => Some(InteractionRoute::Pagination),
        demo::source::COMMAND => Some(InteractionRoute::Source),
        utility::help::COMMAND => Some(InteractionRoute::Help),
        _ => None,
    }
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    demo::pagination::META,
    demo::pagination::PROPS_META,
    demo::source::META,
    utility::help::META,
    // Add new commands here
];

/// A message split into command name, first argument and the rest.
#[derive(Debug, PartialEq, Eq)]
struct ParsedCommand<'a> {
    name: String,
    arg1: Option<&'a str>,
    arg_tail: Option<&'a str>,
}

fn parse_message_command(content: &str) -> Option<ParsedCommand<'_>> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();

    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());
            (first, tail)
        }
        None => (None, None),
    };

    Some(ParsedCommand {
        name,
        arg1,
        arg_tail,
    })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some(parsed) = parse_message_command(&content) else {
        return Ok(());
    };
    let ParsedCommand {
        name,
        arg1,
        arg_tail,
    } = parsed;

    debug!(command = %name, ?arg1, ?arg_tail, "message command");

    match name.as_str() {
        "pagination" if arg1.is_some_and(|arg| arg.eq_ignore_ascii_case("props")) => {
            demo::pagination::run_props(ctx.clone(), msg).await?
        }
        "pagination" => demo::pagination::run(ctx.clone(), msg, arg1, arg_tail).await?,
        "source" => demo::source::run(ctx.clone(), msg, arg1, arg_tail).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(route) = interaction_custom_id(&interaction).and_then(route_interaction) else {
        return Ok(());
    };

    let handled = match route {
        InteractionRoute::Pagination => {
            demo::pagination::handle_interaction(ctx.clone(), interaction).await?
        }
        InteractionRoute::Source => {
            demo::source::handle_interaction(ctx.clone(), interaction).await?
        }
        InteractionRoute::Help => {
            utility::help::handle_interaction(ctx.clone(), interaction).await?
        }
    };

    if !handled {
        info!(?route, "interaction matched a route but no handler");
    }

    Ok(())
}
