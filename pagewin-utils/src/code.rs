//! Paged, fenced source listings for the code viewer.

use crate::pagination::{page_item_range, total_pages};

/// Lines of source per viewer page.
pub const LINES_PER_PAGE: usize = 25;
/// Longer lines are cut so a page always fits an embed description.
pub const MAX_LINE_CHARS: usize = 120;

const TEST_MODULE_MARKER: &str = "\n#[cfg(test)]";

/// A source file shown by the code viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceListing {
    /// Name used to select the listing (`!source <name>`).
    pub name: &'static str,
    pub path: &'static str,
    /// Fence language tag.
    pub language: &'static str,
    pub source: &'static str,
}

impl SourceListing {
    /// Source lines, without the trailing test module.
    pub fn lines(&self) -> Vec<&'static str> {
        let body = self
            .source
            .split_once(TEST_MODULE_MARKER)
            .map_or(self.source, |(body, _)| body);
        body.trim_end().lines().collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.lines().len(), LINES_PER_PAGE)
    }

    /// Page `page` of the listing as a fenced code block.
    pub fn code_block(&self, page: usize) -> String {
        let lines = self.lines();
        let range = page_item_range(lines.len(), LINES_PER_PAGE, page);
        let body = lines[range]
            .iter()
            .map(|line| sanitize_line(line))
            .collect::<Vec<_>>()
            .join("\n");
        format!("```{}\n{}\n```", self.language, body)
    }
}

/// The window calculator, the component the demo is built around.
pub const COMPONENT_SOURCE: SourceListing = SourceListing {
    name: "component",
    path: "pagewin-utils/src/pagination/window.rs",
    language: "rust",
    source: include_str!("pagination/window.rs"),
};

/// The button builders that render a computed window.
pub const CONTROLS_SOURCE: SourceListing = SourceListing {
    name: "controls",
    path: "pagewin-utils/src/pagination/components.rs",
    language: "rust",
    source: include_str!("pagination/components.rs"),
};

pub const SOURCE_LISTINGS: &[SourceListing] = &[COMPONENT_SOURCE, CONTROLS_SOURCE];

/// Find a listing by name, case-insensitively.
pub fn find_listing(name: &str) -> Option<&'static SourceListing> {
    SOURCE_LISTINGS
        .iter()
        .find(|listing| listing.name.eq_ignore_ascii_case(name.trim()))
}

fn sanitize_line(line: &str) -> String {
    // A literal fence inside the listing would close the code block early.
    let line = line.replace("```", "`\u{200b}``");
    if line.chars().count() <= MAX_LINE_CHARS {
        return line;
    }
    let mut cut: String = line.chars().take(MAX_LINE_CHARS - 1).collect();
    cut.push('…');
    cut
}
