//! Property table describing the pagination component's inputs.

use twilight_model::channel::message::embed::Embed;

use pagewin_utils::embed::{EmbedField, build_embed};

/// One documented input of the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropDoc {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
}

pub const PAGINATION_PROPS: &[PropDoc] = &[
    PropDoc {
        name: "total_items",
        kind: "usize",
        description: "Total number of items to paginate.",
    },
    PropDoc {
        name: "page_size",
        kind: "usize (>= 1)",
        description: "Items shown on one page.",
    },
    PropDoc {
        name: "window_size",
        kind: "usize (>= 1)",
        description: "Number of page buttons shown at once.",
    },
    PropDoc {
        name: "current_page",
        kind: "usize (>= 1), host state",
        description: "The active page. Owned by the host and never clamped.",
    },
    PropDoc {
        name: "on_page_change",
        kind: "button press, host callback",
        description: "Host recomputes with the previous, next or clicked page.",
    },
];

/// Render `props` as a numbered table embed.
pub fn build_props_embed(title: &str, props: &[PropDoc]) -> anyhow::Result<Embed> {
    let fields: Vec<EmbedField> = props
        .iter()
        .enumerate()
        .map(|(index, prop)| {
            EmbedField::block(
                format!("{}. {}", index + 1, prop.name),
                format!("`{}`\n{}", prop.kind, prop.description),
            )
        })
        .collect();

    build_embed(title, "Inputs accepted by the component.", &fields, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_table_numbers_each_input() {
        let embed = build_props_embed("Pagination props", PAGINATION_PROPS).unwrap();

        assert_eq!(embed.fields.len(), PAGINATION_PROPS.len());
        assert_eq!(embed.fields[0].name, "1. total_items");
        assert!(embed.fields[2].value.contains("page buttons"));
        assert!(embed.footer.is_none());
    }
}
