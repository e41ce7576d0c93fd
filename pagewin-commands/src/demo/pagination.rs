use std::sync::Arc;

use tracing::{debug, info};
use twilight_model::channel::message::{component::Component, embed::Embed};
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::CommandMeta;
use crate::demo::props::{PAGINATION_PROPS, build_props_embed};
use pagewin_core::{Context, DemoDefaults};
use pagewin_utils::embed::{EmbedField, build_embed};
use pagewin_utils::pagination::respond::SESSION_INVALID_MESSAGE;
use pagewin_utils::pagination::token::COMMAND_PARAM_SEPARATOR;
use pagewin_utils::pagination::{
    ButtonValidation, MAX_WINDOW_BUTTONS, ModalInput, ModalKind, ModalValidation, PageAction,
    PageWindow, PageWindowRequest, Session, build_window_components, modal_value, page_item_range,
    respond_ephemeral_message, respond_text_modal, send_paginated_message,
    update_paginated_interaction_message, validate_button_interaction, validate_modal_interaction,
};
use pagewin_utils::parse::{parse_count, split_args};

pub const COMMAND: &str = "pagination";

pub const META: CommandMeta = CommandMeta {
    name: "pagination",
    desc: "Render the live pagination component.",
    category: "demo",
    usage: "!pagination [total_items] [page_size] [window_size]",
};

pub const PROPS_META: CommandMeta = CommandMeta {
    name: "pagination props",
    desc: "Describe the pagination component's inputs.",
    category: "demo",
    usage: "!pagination props",
};

/// Keeps every value short enough for the 100-character custom ID limit.
pub const MAX_INPUT_VALUE: usize = 1_000_000;

/// Room for `MAX_INPUT_VALUE` written with digit separators (`1,000,000`).
const SETTINGS_INPUT_MAX_LENGTH: u16 = 9;

const TOTAL_ITEMS_INPUT: &str = "total_items";
const PAGE_SIZE_INPUT: &str = "page_size";
const WINDOW_SIZE_INPUT: &str = "window_size";

/// The three numeric inputs a user can tweak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DemoInputs {
    total_items: usize,
    page_size: usize,
    window_size: usize,
}

impl From<DemoDefaults> for DemoInputs {
    fn from(defaults: DemoDefaults) -> Self {
        Self {
            total_items: defaults.total_items,
            page_size: defaults.page_size,
            window_size: defaults.window_size,
        }
    }
}

impl DemoInputs {
    /// Command key carrying the inputs through component custom IDs.
    fn command_key(&self) -> String {
        format!(
            "{COMMAND}{sep}{}{sep}{}{sep}{}",
            self.total_items,
            self.page_size,
            self.window_size,
            sep = COMMAND_PARAM_SEPARATOR
        )
    }

    fn from_command_key(command: &str) -> Option<Self> {
        let mut parts = command.split(COMMAND_PARAM_SEPARATOR);
        if parts.next()? != COMMAND {
            return None;
        }
        let inputs = Self {
            total_items: parts.next()?.parse().ok()?,
            page_size: parts.next()?.parse().ok()?,
            window_size: parts.next()?.parse().ok()?,
        };
        parts.next().is_none().then_some(inputs)
    }

    /// Parse up to three positional values; missing ones keep `self`'s.
    fn with_args(self, args: &[&str]) -> Result<Self, String> {
        let mut values = [self.total_items, self.page_size, self.window_size];
        let names = [TOTAL_ITEMS_INPUT, PAGE_SIZE_INPUT, WINDOW_SIZE_INPUT];

        if args.len() > values.len() {
            return Err(format!("Too many arguments. Usage: `{}`", META.usage));
        }
        for ((value, name), raw) in values.iter_mut().zip(names).zip(args) {
            *value = parse_count(raw, MAX_INPUT_VALUE)
                .map_err(|err| format!("`{name}` is {err}: `{raw}`"))?;
        }

        Self {
            total_items: values[0],
            page_size: values[1],
            window_size: values[2],
        }
        .checked()
    }

    /// Apply the host's own limits; zero sizes are left to the calculator.
    ///
    /// Runs on every source of inputs, configured defaults included.
    fn checked(self) -> Result<Self, String> {
        let fields = [
            (TOTAL_ITEMS_INPUT, self.total_items),
            (PAGE_SIZE_INPUT, self.page_size),
            (WINDOW_SIZE_INPUT, self.window_size),
        ];
        let oversized = fields
            .into_iter()
            .find(|(_, value)| *value > MAX_INPUT_VALUE);
        if let Some((name, value)) = oversized {
            return Err(format!("`{name}` is {value}, above the limit of {MAX_INPUT_VALUE}."));
        }
        if self.window_size > MAX_WINDOW_BUTTONS {
            return Err(format!(
                "`{WINDOW_SIZE_INPUT}` can be at most {MAX_WINDOW_BUTTONS} \
                 (Discord component limit)."
            ));
        }
        Ok(self)
    }

    fn request(&self, current_page: usize) -> PageWindowRequest {
        PageWindowRequest {
            total_items: self.total_items,
            page_size: self.page_size,
            window_size: self.window_size,
            current_page,
        }
    }
}

/// Render the live component.
///
/// Inputs:
/// - optional `!pagination [total_items] [page_size] [window_size]`, defaults from config.
///
/// Error behavior:
/// - malformed numbers return a usage message.
/// - zero page size or window size returns the calculator's error.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let args: Vec<&str> = arg1.into_iter().chain(split_args(arg_tail)).collect();

    let inputs = match DemoInputs::from(ctx.config.demo).with_args(&args) {
        Ok(inputs) => inputs,
        Err(out) => {
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
    };

    let current_page = 1;
    let window = match inputs.request(current_page).compute() {
        Ok(window) => window,
        Err(err) => {
            let out = format!("Cannot paginate: {err}.");
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
    };

    let session = Session::new(
        inputs.command_key(),
        msg.author.id.get(),
        ctx.config.session_timeout_secs,
    );
    let (embed, components) = window_view(&inputs, current_page, &window, &session)?;

    info!(
        user_id = session.user_id,
        total_items = inputs.total_items,
        page_size = inputs.page_size,
        window_size = inputs.window_size,
        "pagination demo rendered"
    );

    send_paginated_message(
        Arc::clone(&ctx.http),
        msg.channel_id,
        embed,
        components,
        ctx.config.session_timeout_secs,
    )
    .await
}

/// Show the props table.
pub async fn run_props(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let embed = build_props_embed("Pagination props", PAGINATION_PROPS)?;
    ctx.http
        .create_message(msg.channel_id)
        .embeds(&[embed])
        .await?;

    Ok(())
}

/// Handle page buttons and settings-modal submits of the demo.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;

    match validate_button_interaction(http, &interaction, COMMAND).await? {
        ButtonValidation::HandledInvalid => return Ok(true),
        ButtonValidation::Valid {
            actor_user_id,
            token,
        } => {
            let Some(inputs) = DemoInputs::from_command_key(&token.command) else {
                respond_ephemeral_message(http, &interaction, SESSION_INVALID_MESSAGE).await?;
                return Ok(true);
            };

            match token.action {
                PageAction::Settings => {
                    let modal =
                        token
                            .session()
                            .modal(ModalKind::Settings, token.page, token.total_pages);
                    respond_text_modal(
                        http,
                        &interaction,
                        &modal,
                        "Pagination Settings",
                        &settings_inputs(&inputs),
                    )
                    .await?;
                }
                PageAction::Prev | PageAction::Next | PageAction::Page => {
                    debug!(action = ?token.action, page = token.page, "pagination demo navigation");
                    rerender(&ctx, &interaction, inputs, token.page, actor_user_id).await?;
                }
                PageAction::Jump => {
                    respond_ephemeral_message(http, &interaction, SESSION_INVALID_MESSAGE)
                        .await?;
                }
            }
            return Ok(true);
        }
        ButtonValidation::NotForCommand => {}
    }

    match validate_modal_interaction(http, &interaction, COMMAND, ModalKind::Settings).await? {
        ModalValidation::NotForCommand => Ok(false),
        ModalValidation::HandledInvalid => Ok(true),
        ModalValidation::Valid {
            actor_user_id,
            token,
            values,
        } => {
            let inputs = match inputs_from_modal(&values) {
                Ok(inputs) => inputs,
                Err(out) => {
                    respond_ephemeral_message(http, &interaction, &out).await?;
                    return Ok(true);
                }
            };

            // The current page survives an input change, even when it no longer exists.
            rerender(&ctx, &interaction, inputs, token.page, actor_user_id).await?;
            Ok(true)
        }
    }
}

async fn rerender(
    ctx: &Context,
    interaction: &InteractionCreate,
    inputs: DemoInputs,
    current_page: usize,
    actor_user_id: u64,
) -> anyhow::Result<()> {
    let window = match inputs.request(current_page).compute() {
        Ok(window) => window,
        Err(err) => {
            let out = format!("Cannot paginate: {err}.");
            return respond_ephemeral_message(&ctx.http, interaction, &out).await;
        }
    };

    let session = Session::new(
        inputs.command_key(),
        actor_user_id,
        ctx.config.session_timeout_secs,
    );
    let (embed, components) = window_view(&inputs, current_page, &window, &session)?;

    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        interaction,
        embed,
        components,
        ctx.config.session_timeout_secs,
    )
    .await
}

fn settings_inputs(inputs: &DemoInputs) -> [ModalInput; 3] {
    let max_length = SETTINGS_INPUT_MAX_LENGTH;
    let input = |custom_id: &'static str, label: &str, value: usize| ModalInput {
        custom_id,
        label: label.to_owned(),
        placeholder: None,
        value: Some(value.to_string()),
        max_length,
    };

    [
        input(TOTAL_ITEMS_INPUT, "Total items", inputs.total_items),
        input(PAGE_SIZE_INPUT, "Items per page", inputs.page_size),
        input(WINDOW_SIZE_INPUT, "Page buttons", inputs.window_size),
    ]
}

fn inputs_from_modal(values: &[(String, String)]) -> Result<DemoInputs, String> {
    let field = |name: &str| -> Result<usize, String> {
        let raw = modal_value(values, name).unwrap_or_default();
        parse_count(raw, MAX_INPUT_VALUE).map_err(|err| format!("`{name}` is {err}: `{raw}`"))
    };

    DemoInputs {
        total_items: field(TOTAL_ITEMS_INPUT)?,
        page_size: field(PAGE_SIZE_INPUT)?,
        window_size: field(WINDOW_SIZE_INPUT)?,
    }
    .checked()
}

fn window_view(
    inputs: &DemoInputs,
    current_page: usize,
    window: &PageWindow,
    session: &Session,
) -> anyhow::Result<(Embed, Vec<Component>)> {
    let fields = [
        EmbedField::inline("Total items", inputs.total_items),
        EmbedField::inline("Items per page", inputs.page_size),
        EmbedField::inline("Page buttons", inputs.window_size),
    ];
    let footer = format!("Page {current_page}/{}", window.total_pages);

    let summary = window_summary(inputs, current_page, window);
    let embed = build_embed("Pagination", summary, &fields, &footer)?;
    let components = build_window_components(session, current_page, window);

    Ok((embed, components))
}

fn window_summary(inputs: &DemoInputs, current_page: usize, window: &PageWindow) -> String {
    if inputs.total_items == 0 {
        return "There are no items to paginate.".to_owned();
    }

    let items = page_item_range(inputs.total_items, inputs.page_size, current_page);
    if items.is_empty() {
        return format!(
            "Page {current_page} is past the last page ({}). \
             Use the buttons or settings to move back.",
            window.total_pages
        );
    }

    format!(
        "Showing items {}-{} of {}.",
        items.start + 1,
        items.end,
        inputs.total_items
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(total_items: usize, page_size: usize, window_size: usize) -> DemoInputs {
        DemoInputs {
            total_items,
            page_size,
            window_size,
        }
    }

    #[test]
    fn command_key_carries_inputs() {
        let key = inputs(178, 10, 2).command_key();

        assert_eq!(key, "pagination|178|10|2");
        assert_eq!(DemoInputs::from_command_key(&key), Some(inputs(178, 10, 2)));
        assert_eq!(DemoInputs::from_command_key("pagination|178|10"), None);
        assert_eq!(DemoInputs::from_command_key("help|178|10|2"), None);
        assert_eq!(DemoInputs::from_command_key("pagination|1|2|3|4"), None);
    }

    #[test]
    fn longest_custom_id_fits_discord_limit() {
        let max = inputs(MAX_INPUT_VALUE, MAX_INPUT_VALUE, MAX_WINDOW_BUTTONS);
        let session = Session {
            command: max.command_key(),
            user_id: u64::MAX,
            expires_at: u64::MAX,
        };
        let button = session.button(PageAction::Settings, MAX_INPUT_VALUE, MAX_INPUT_VALUE);
        let modal = session.modal(ModalKind::Settings, MAX_INPUT_VALUE, MAX_INPUT_VALUE);

        assert!(button.encode().len() <= 100, "{}", button.encode());
        assert!(modal.encode().len() <= 100, "{}", modal.encode());
    }

    #[test]
    fn positional_args_override_defaults() {
        let defaults = DemoInputs::from(DemoDefaults::default());

        assert_eq!(defaults.with_args(&[]), Ok(inputs(178, 10, 2)));
        assert_eq!(defaults.with_args(&["50"]), Ok(inputs(50, 10, 2)));
        assert_eq!(defaults.with_args(&["50", "5", "7"]), Ok(inputs(50, 5, 7)));
        assert_eq!(defaults.with_args(&["50", "0"]), Ok(inputs(50, 0, 2)));
    }

    #[test]
    fn bad_args_are_explained() {
        let defaults = DemoInputs::from(DemoDefaults::default());

        let err = defaults.with_args(&["lots"]).unwrap_err();
        assert!(err.contains("total_items"));

        let err = defaults.with_args(&["1", "2", "21"]).unwrap_err();
        assert!(err.contains("at most 20"));

        let err = defaults.with_args(&["1", "2", "3", "4"]).unwrap_err();
        assert!(err.contains("Too many arguments"));
    }

    #[test]
    fn modal_values_replace_all_inputs() {
        let values = vec![
            (TOTAL_ITEMS_INPUT.to_owned(), "30".to_owned()),
            (PAGE_SIZE_INPUT.to_owned(), "3".to_owned()),
            (WINDOW_SIZE_INPUT.to_owned(), "4".to_owned()),
        ];
        assert_eq!(inputs_from_modal(&values), Ok(inputs(30, 3, 4)));

        let err = inputs_from_modal(&values[..2]).unwrap_err();
        assert!(err.contains("window_size"));
    }

    #[test]
    fn settings_prefill_current_inputs() {
        let fields = settings_inputs(&inputs(178, 10, 2));

        assert_eq!(fields[0].value.as_deref(), Some("178"));
        assert_eq!(fields[2].custom_id, WINDOW_SIZE_INPUT);
        assert_eq!(fields[1].max_length, 9);
    }

    #[test]
    fn largest_separated_value_fits_the_settings_input() {
        let widest = "1,000,000";

        assert_eq!(parse_count(widest, MAX_INPUT_VALUE), Ok(MAX_INPUT_VALUE));
        assert!(widest.len() <= usize::from(SETTINGS_INPUT_MAX_LENGTH));
    }

    #[test]
    fn configured_defaults_respect_the_input_cap() {
        let oversized = DemoInputs::from(DemoDefaults {
            total_items: usize::MAX,
            page_size: 1,
            window_size: 2,
        });

        let err = oversized.with_args(&[]).unwrap_err();
        assert!(err.contains("total_items"), "{err}");

        assert_eq!(oversized.with_args(&["500"]), Ok(inputs(500, 1, 2)));
    }

    #[test]
    fn summary_describes_the_current_page() {
        let demo = inputs(178, 10, 7);

        let window = demo.request(18).compute().unwrap();
        assert_eq!(window_summary(&demo, 18, &window), "Showing items 171-178 of 178.");

        let window = demo.request(30).compute().unwrap();
        let summary = window_summary(&demo, 30, &window);
        assert!(summary.starts_with("Page 30 is past the last page (18)"));

        let empty = inputs(0, 10, 7);
        let window = empty.request(1).compute().unwrap();
        assert_eq!(window_summary(&empty, 1, &window), "There are no items to paginate.");
    }

    #[test]
    fn view_has_page_rows_and_navigation() {
        let demo = inputs(178, 10, 7);
        let window = demo.request(1).compute().unwrap();
        let session = Session {
            command: demo.command_key(),
            user_id: 1,
            expires_at: 10,
        };

        let (embed, components) = window_view(&demo, 1, &window, &session).unwrap();

        assert_eq!(embed.footer.unwrap().text, "Page 1/18");
        assert_eq!(embed.fields.len(), 3);
        assert_eq!(components.len(), 3);
    }
}
