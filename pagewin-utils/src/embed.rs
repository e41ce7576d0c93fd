use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// One name/value pair shown under an embed's description.
#[derive(Debug, Clone)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            inline: true,
        }
    }

    pub fn block(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            inline: false,
        }
    }
}

/// Footer text for a paginated embed.
///
/// Single-page embeds only show the note, if any.
pub fn paginated_footer(page: usize, total_pages: usize, footer_note: Option<&str>) -> String {
    let note = footer_note.filter(|note| !note.is_empty());
    if total_pages > 1 {
        match note {
            Some(note) => format!("Page {page}/{total_pages} • {note}"),
            None => format!("Page {page}/{total_pages}"),
        }
    } else {
        note.map(ToOwned::to_owned).unwrap_or_default()
    }
}

/// Build a standard paginated embed with consistent styling.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<Embed> {
    let footer = paginated_footer(page.max(1), total_pages.max(1), footer_note);
    build_embed(title, description, &[], &footer)
}

/// Build an embed with fields and an optional footer (empty means none).
pub fn build_embed(
    title: &str,
    description: impl Into<String>,
    fields: &[EmbedField],
    footer: &str,
) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    for field in fields {
        let built = EmbedFieldBuilder::new(field.name.clone(), field.value.clone());
        let built = if field.inline { built.inline() } else { built };
        builder = builder.field(built.build());
    }

    if !footer.is_empty() {
        builder = builder.footer(EmbedFooterBuilder::new(footer).build());
    }

    Ok(builder.validate()?.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_shows_page_only_when_paginated() {
        assert_eq!(paginated_footer(2, 5, None), "Page 2/5");
        assert_eq!(paginated_footer(2, 5, Some("note")), "Page 2/5 • note");
        assert_eq!(paginated_footer(1, 1, Some("note")), "note");
        assert_eq!(paginated_footer(1, 1, Some("")), "");
    }

    #[test]
    fn embed_carries_fields_and_footer() {
        let embed = build_embed(
            "Title",
            "Body",
            &[EmbedField::inline("Total items", 178), EmbedField::block("Note", "n")],
            "Page 1/18",
        )
        .unwrap();

        assert_eq!(embed.fields.len(), 2);
        assert!(embed.fields[0].inline);
        assert!(!embed.fields[1].inline);
        assert_eq!(embed.footer.unwrap().text, "Page 1/18");
        assert_eq!(embed.color, Some(DEFAULT_EMBED_COLOR));
    }
}
