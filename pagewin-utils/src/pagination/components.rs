//! Button builders for paginated messages.

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::token::{PageAction, Session};
use super::window::PageWindow;

/// Discord allows five buttons per action row.
pub const BUTTONS_PER_ROW: usize = 5;

/// Upper bound on page buttons in a window view.
///
/// A message holds at most five rows; one is taken by the navigation row.
pub const MAX_WINDOW_BUTTONS: usize = 4 * BUTTONS_PER_ROW;

/// Previous / jump / next row for list views. Empty for single-page lists.
pub fn build_nav_components(
    session: &Session,
    current_page: usize,
    total_pages: usize,
) -> Vec<Component> {
    if total_pages <= 1 {
        return vec![];
    }

    let prev = session.button(PageAction::Prev, previous_page(current_page), total_pages);
    let jump = session.button(PageAction::Jump, current_page, total_pages);
    let next_page = current_page.saturating_add(1).min(total_pages);
    let next = session.button(PageAction::Next, next_page, total_pages);

    vec![action_row(vec![
        button(prev.encode(), "◀ Prev", ButtonStyle::Secondary, current_page <= 1),
        button(jump.encode(), "Jump", ButtonStyle::Secondary, false),
        button(next.encode(), "Next ▶", ButtonStyle::Secondary, current_page >= total_pages),
    ])]
}

/// One button per page in `window`, followed by a previous / settings / next row.
///
/// The active page is highlighted. Previous and next are enabled exactly when
/// the window says so; their targets are `current_page - 1` and `current_page + 1`.
pub fn build_window_components(
    session: &Session,
    current_page: usize,
    window: &PageWindow,
) -> Vec<Component> {
    let total_pages = window.total_pages;

    let mut rows: Vec<Component> = window
        .page_numbers
        .iter()
        .take(MAX_WINDOW_BUTTONS)
        .map(|&page| {
            let style = if page == current_page {
                ButtonStyle::Primary
            } else {
                ButtonStyle::Secondary
            };
            let token = session.button(PageAction::Page, page, total_pages);
            button(token.encode(), &page.to_string(), style, false)
        })
        .collect::<Vec<_>>()
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| action_row(chunk.to_vec()))
        .collect();

    let prev = session.button(PageAction::Prev, previous_page(current_page), total_pages);
    let settings = session.button(PageAction::Settings, current_page, total_pages);
    let next = session.button(PageAction::Next, current_page.saturating_add(1), total_pages);

    rows.push(action_row(vec![
        button(prev.encode(), "◀ Previous", ButtonStyle::Secondary, !window.can_go_previous),
        button(settings.encode(), "⚙ Settings", ButtonStyle::Secondary, false),
        button(next.encode(), "Next ▶", ButtonStyle::Secondary, !window.can_go_next),
    ]));

    rows
}

fn previous_page(current_page: usize) -> usize {
    current_page.saturating_sub(1).max(1)
}

fn action_row(components: Vec<Component>) -> Component {
    Component::ActionRow(ActionRow { id: None, components })
}

fn button(custom_id: String, label: &str, style: ButtonStyle, disabled: bool) -> Component {
    Component::Button(Button {
        id: None,
        custom_id: Some(custom_id),
        disabled,
        emoji: None,
        label: Some(label.to_owned()),
        style,
        url: None,
        sku_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::token::ButtonToken;
    use crate::pagination::window::PageWindowRequest;

    fn session() -> Session {
        Session {
            command: "pagination|178|10|7".to_owned(),
            user_id: 1,
            expires_at: 100,
        }
    }

    fn rows(components: &[Component]) -> Vec<Vec<&Button>> {
        components
            .iter()
            .map(|row| match row {
                Component::ActionRow(row) => row
                    .components
                    .iter()
                    .map(|component| match component {
                        Component::Button(button) => button,
                        other => panic!("unexpected component {other:?}"),
                    })
                    .collect(),
                other => panic!("unexpected top-level component {other:?}"),
            })
            .collect()
    }

    fn token(button: &Button) -> ButtonToken {
        ButtonToken::parse(button.custom_id.as_deref().unwrap()).unwrap()
    }

    fn window(current_page: usize) -> PageWindow {
        PageWindowRequest {
            total_items: 178,
            page_size: 10,
            window_size: 7,
            current_page,
        }
        .compute()
        .unwrap()
    }

    #[test]
    fn window_buttons_fill_rows_of_five() {
        let components = build_window_components(&session(), 8, &window(8));
        let rows = rows(&components);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(rows[1].len(), 2);

        let labels: Vec<_> = rows[..2]
            .iter()
            .flatten()
            .map(|b| b.label.clone().unwrap())
            .collect();
        assert_eq!(labels, ["8", "9", "10", "11", "12", "13", "14"]);
        assert_eq!(rows[0][0].style, ButtonStyle::Primary);
        assert_eq!(rows[0][1].style, ButtonStyle::Secondary);
    }

    #[test]
    fn nav_row_follows_window_flags() {
        let components = build_window_components(&session(), 1, &window(1));
        let nav = rows(&components).pop().unwrap();

        assert!(nav[0].disabled);
        assert!(!nav[1].disabled);
        assert!(!nav[2].disabled);
        assert_eq!(token(nav[2]).page, 2);
        assert_eq!(token(nav[2]).action, PageAction::Next);

        let components = build_window_components(&session(), 18, &window(18));
        let nav = rows(&components).pop().unwrap();
        assert!(!nav[0].disabled);
        assert_eq!(token(nav[0]).page, 17);
        assert!(nav[2].disabled);
    }

    #[test]
    fn empty_window_keeps_nav_row() {
        let components = build_window_components(&session(), 30, &window(30));
        let rows = rows(&components);

        assert_eq!(rows.len(), 1);
        assert!(!rows[0][0].disabled);
        assert_eq!(token(rows[0][0]).page, 29);
    }

    #[test]
    fn custom_ids_are_unique() {
        let components = build_window_components(&session(), 2, &window(2));
        let mut ids: Vec<_> = rows(&components)
            .into_iter()
            .flatten()
            .map(|b| b.custom_id.clone().unwrap())
            .collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn list_nav_hidden_for_single_page() {
        assert!(build_nav_components(&session(), 1, 1).is_empty());

        let components = build_nav_components(&session(), 3, 3);
        let nav = rows(&components).pop().unwrap();
        assert_eq!(token(nav[0]).page, 2);
        assert_eq!(token(nav[1]).action, PageAction::Jump);
        assert!(nav[2].disabled);
    }
}
