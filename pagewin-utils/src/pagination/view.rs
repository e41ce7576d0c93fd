//! Embed and component composition for paginated list views.

use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;

use crate::embed::build_paginated_embed;

use super::components::build_nav_components;
use super::page::clamp_page;
use super::token::Session;

/// Build a paginated view from a pre-rendered description.
pub fn build_paginated_view(
    session: &Session,
    title: &str,
    description: String,
    page: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<(Embed, Vec<Component>)> {
    let page = clamp_page(page, total_pages);
    let total_pages = total_pages.max(1);

    let embed = build_paginated_embed(title, description, page, total_pages, footer_note)?;
    let components = build_nav_components(session, page, total_pages);

    Ok((embed, components))
}
