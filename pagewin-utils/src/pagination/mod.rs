//! Stable facade for pagination helpers used by command handlers.

pub mod components;
pub mod interaction;
mod page;
pub mod respond;
pub mod token;
mod view;
pub mod window;

pub use components::{MAX_WINDOW_BUTTONS, build_nav_components, build_window_components};
pub use interaction::{
    ButtonValidation, ModalValidation, interaction_custom_id, modal_value,
    validate_button_interaction, validate_modal_interaction,
};
pub use page::{
    clamp_page, page_item_range, parse_one_based_page, resolve_modal_target_page, total_pages,
};
pub use respond::{
    JUMP_PAGE_INPUT, ModalInput, respond_ephemeral_message, respond_jump_modal,
    respond_text_modal, send_paginated_message, update_paginated_interaction_message,
};
pub use token::{ModalKind, PageAction, Session, custom_id_base_command};
pub use view::build_paginated_view;
pub use window::{PageWindow, PageWindowError, PageWindowRequest, compute_page_window};
