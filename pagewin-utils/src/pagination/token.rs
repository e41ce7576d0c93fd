//! Stateless component tokens carried in button and modal custom IDs.
//!
//! Every interactive component encodes the session it belongs to, so no
//! server-side state is needed to answer a click.

use std::time::{SystemTime, UNIX_EPOCH};

const BUTTON_PREFIX: &str = "pg";
const MODAL_PREFIX: &str = "pgm";

/// Separates a command's base name from its parameters (`pagination|178|10|2`).
pub const COMMAND_PARAM_SEPARATOR: char = '|';

/// What a pagination button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Prev,
    Next,
    /// A numbered page button.
    Page,
    Jump,
    Settings,
}

impl PageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Page => "page",
            Self::Jump => "jump",
            Self::Settings => "settings",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "page" => Some(Self::Page),
            "jump" => Some(Self::Jump),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// Which modal a modal token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Jump,
    Settings,
}

impl ModalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Settings => "settings",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "jump" => Some(Self::Jump),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// Owner, command key and expiry shared by every component of one paginated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Command key, optionally carrying `|`-separated parameters.
    pub command: String,
    pub user_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

impl Session {
    /// Start a session that expires `timeout_secs` from now.
    pub fn new(command: impl Into<String>, user_id: u64, timeout_secs: u64) -> Self {
        Self {
            command: command.into(),
            user_id,
            expires_at: now_unix_secs().saturating_add(timeout_secs),
        }
    }

    pub fn button(&self, action: PageAction, page: usize, total_pages: usize) -> ButtonToken {
        ButtonToken {
            command: self.command.clone(),
            action,
            page,
            total_pages,
            user_id: self.user_id,
            expires_at: self.expires_at,
        }
    }

    pub fn modal(&self, kind: ModalKind, page: usize, total_pages: usize) -> ModalToken {
        ModalToken {
            kind,
            command: self.command.clone(),
            page,
            total_pages,
            user_id: self.user_id,
            expires_at: self.expires_at,
        }
    }
}

/// Parsed button custom ID: `pg:{command}:{action}:{page}:{total_pages}:{user_id}:{expires_at}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonToken {
    pub command: String,
    pub action: PageAction,
    /// Target page, 1-based.
    pub page: usize,
    /// Page count when the button was rendered.
    pub total_pages: usize,
    pub user_id: u64,
    pub expires_at: u64,
}

impl ButtonToken {
    pub fn encode(&self) -> String {
        format!(
            "{BUTTON_PREFIX}:{}:{}:{}:{}:{}:{}",
            self.command,
            self.action.as_str(),
            self.page,
            self.total_pages,
            self.user_id,
            self.expires_at
        )
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        let [prefix, command, action, page, total_pages, user_id, expires_at] =
            split_fields(custom_id)?;
        if prefix != BUTTON_PREFIX {
            return None;
        }

        Some(Self {
            command: command.to_owned(),
            action: PageAction::parse(action)?,
            page: page.parse().ok()?,
            total_pages: total_pages.parse().ok()?,
            user_id: user_id.parse().ok()?,
            expires_at: expires_at.parse().ok()?,
        })
    }

    pub fn base_command(&self) -> &str {
        base_command(&self.command)
    }

    /// The session this button was rendered for.
    pub fn session(&self) -> Session {
        Session {
            command: self.command.clone(),
            user_id: self.user_id,
            expires_at: self.expires_at,
        }
    }
}

/// Parsed modal custom ID: `pgm:{kind}:{command}:{page}:{total_pages}:{user_id}:{expires_at}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalToken {
    pub kind: ModalKind,
    pub command: String,
    /// Page active when the modal was opened.
    pub page: usize,
    /// Page count when the modal was opened.
    pub total_pages: usize,
    pub user_id: u64,
    pub expires_at: u64,
}

impl ModalToken {
    pub fn encode(&self) -> String {
        format!(
            "{MODAL_PREFIX}:{}:{}:{}:{}:{}:{}",
            self.kind.as_str(),
            self.command,
            self.page,
            self.total_pages,
            self.user_id,
            self.expires_at
        )
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        let [prefix, kind, command, page, total_pages, user_id, expires_at] =
            split_fields(custom_id)?;
        if prefix != MODAL_PREFIX {
            return None;
        }

        Some(Self {
            kind: ModalKind::parse(kind)?,
            command: command.to_owned(),
            page: page.parse().ok()?,
            total_pages: total_pages.parse().ok()?,
            user_id: user_id.parse().ok()?,
            expires_at: expires_at.parse().ok()?,
        })
    }

    pub fn base_command(&self) -> &str {
        base_command(&self.command)
    }
}

/// Why a component token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Invalid,
    WrongCommand,
    WrongUser,
    Expired,
}

/// Check a button token against the handling command, the clicking user and the clock.
///
/// Page bounds are left to the handler: list views clamp, the window demo
/// keeps out-of-range pages as they are.
pub fn validate_button_token(
    custom_id: &str,
    expected_base: &str,
    actor_user_id: u64,
    now: u64,
) -> Result<ButtonToken, TokenRejection> {
    let token = ButtonToken::parse(custom_id).ok_or(TokenRejection::Invalid)?;
    check_session(
        token.base_command(),
        expected_base,
        token.user_id,
        actor_user_id,
        token.expires_at,
        now,
    )?;
    if token.page == 0 {
        return Err(TokenRejection::Invalid);
    }
    Ok(token)
}

/// Check a modal token the same way as [`validate_button_token`], plus its kind.
pub fn validate_modal_token(
    custom_id: &str,
    expected_base: &str,
    expected_kind: ModalKind,
    actor_user_id: u64,
    now: u64,
) -> Result<ModalToken, TokenRejection> {
    let token = ModalToken::parse(custom_id).ok_or(TokenRejection::Invalid)?;
    if token.kind != expected_kind {
        return Err(TokenRejection::WrongCommand);
    }
    check_session(
        token.base_command(),
        expected_base,
        token.user_id,
        actor_user_id,
        token.expires_at,
        now,
    )?;
    if token.page == 0 {
        return Err(TokenRejection::Invalid);
    }
    Ok(token)
}

fn check_session(
    base: &str,
    expected_base: &str,
    owner_id: u64,
    actor_user_id: u64,
    expires_at: u64,
    now: u64,
) -> Result<(), TokenRejection> {
    if base != expected_base {
        return Err(TokenRejection::WrongCommand);
    }
    if owner_id != actor_user_id {
        return Err(TokenRejection::WrongUser);
    }
    if is_expired(expires_at, now) {
        return Err(TokenRejection::Expired);
    }
    Ok(())
}

/// Base name of a command key (`pagination|178|10|2` -> `pagination`).
pub fn base_command(command: &str) -> &str {
    command
        .split_once(COMMAND_PARAM_SEPARATOR)
        .map_or(command, |(base, _)| base)
}

/// Base command of any pagination custom ID, button or modal.
pub fn custom_id_base_command(custom_id: &str) -> Option<&str> {
    let mut parts = custom_id.split(':');
    let command = match parts.next()? {
        BUTTON_PREFIX => parts.next()?,
        MODAL_PREFIX => parts.nth(1)?,
        _ => return None,
    };
    Some(base_command(command))
}

/// Whether a unix timestamp is already in the past.
pub fn is_expired(expires_at: u64, now: u64) -> bool {
    now > expires_at
}

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn split_fields<const N: usize>(custom_id: &str) -> Option<[&str; N]> {
    let mut fields = [""; N];
    let mut parts = custom_id.split(':');
    for field in &mut fields {
        *field = parts.next()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            command: "pagination|178|10|2".to_owned(),
            user_id: 42,
            expires_at: 1_000,
        }
    }

    #[test]
    fn button_token_survives_custom_id() {
        let token = session().button(PageAction::Page, 7, 18);
        let custom_id = token.encode();

        assert_eq!(custom_id, "pg:pagination|178|10|2:page:7:18:42:1000");
        assert_eq!(ButtonToken::parse(&custom_id), Some(token));
    }

    #[test]
    fn modal_token_survives_custom_id() {
        let token = session().modal(ModalKind::Settings, 3, 18);
        let custom_id = token.encode();

        assert_eq!(custom_id, "pgm:settings:pagination|178|10|2:3:18:42:1000");
        assert_eq!(ModalToken::parse(&custom_id), Some(token));
    }

    #[test]
    fn malformed_custom_ids_are_ignored() {
        assert_eq!(ButtonToken::parse("pg:help:prev:1:2:3"), None);
        assert_eq!(ButtonToken::parse("pg:help:prev:1:2:3:4:5"), None);
        assert_eq!(ButtonToken::parse("pg:help:sideways:1:2:3:4"), None);
        assert_eq!(ButtonToken::parse("pgm:help:prev:1:2:3:4"), None);
        assert_eq!(ModalToken::parse("pgm:other:help:1:2:3:4"), None);
    }

    #[test]
    fn validation_checks_command_user_and_expiry() {
        let custom_id = session().button(PageAction::Next, 2, 18).encode();

        assert!(validate_button_token(&custom_id, "pagination", 42, 999).is_ok());
        assert_eq!(
            validate_button_token(&custom_id, "help", 42, 999),
            Err(TokenRejection::WrongCommand)
        );
        assert_eq!(
            validate_button_token(&custom_id, "pagination", 7, 999),
            Err(TokenRejection::WrongUser)
        );
        assert_eq!(
            validate_button_token(&custom_id, "pagination", 42, 1_001),
            Err(TokenRejection::Expired)
        );
    }

    #[test]
    fn out_of_range_pages_pass_validation() {
        let custom_id = session().button(PageAction::Prev, 30, 18).encode();
        let token = validate_button_token(&custom_id, "pagination", 42, 0).unwrap();
        assert_eq!(token.page, 30);

        let zero = session().button(PageAction::Prev, 0, 18).encode();
        assert_eq!(
            validate_button_token(&zero, "pagination", 42, 0),
            Err(TokenRejection::Invalid)
        );
    }

    #[test]
    fn modal_page_zero_is_invalid() {
        let zero = "pgm:settings:pagination|178|10|2:0:18:42:1000";
        assert_eq!(
            validate_modal_token(zero, "pagination", ModalKind::Settings, 42, 0),
            Err(TokenRejection::Invalid)
        );

        let past_end = session().modal(ModalKind::Settings, 30, 18).encode();
        let token =
            validate_modal_token(&past_end, "pagination", ModalKind::Settings, 42, 0).unwrap();
        assert_eq!(token.page, 30);
    }

    #[test]
    fn modal_validation_checks_kind() {
        let custom_id = session().modal(ModalKind::Jump, 1, 18).encode();

        assert!(validate_modal_token(&custom_id, "pagination", ModalKind::Jump, 42, 0).is_ok());
        assert_eq!(
            validate_modal_token(&custom_id, "pagination", ModalKind::Settings, 42, 0),
            Err(TokenRejection::WrongCommand)
        );
    }

    #[test]
    fn base_command_of_custom_ids() {
        assert_eq!(base_command("help"), "help");
        assert_eq!(base_command("source|controls"), "source");
        assert_eq!(
            custom_id_base_command("pg:pagination|1|2|3:next:2:3:4:5"),
            Some("pagination")
        );
        assert_eq!(
            custom_id_base_command("pgm:jump:source|component:1:2:3:4"),
            Some("source")
        );
        assert_eq!(custom_id_base_command("other:help"), None);
    }
}
