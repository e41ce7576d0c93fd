//! Runtime configuration read from the environment.

use std::{env, fmt, str::FromStr};

use anyhow::{Context as _, bail};
use tracing::debug;

/// Default lifetime of interactive components, in seconds.
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 120;

/// Initial inputs of the pagination demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoDefaults {
    pub total_items: usize,
    pub page_size: usize,
    pub window_size: usize,
}

impl Default for DemoDefaults {
    fn default() -> Self {
        Self {
            total_items: 178,
            page_size: 10,
            window_size: 2,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub discord_token: String,
    pub demo: DemoDefaults,
    pub session_timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("demo", &self.demo)
            .field("session_timeout_secs", &self.session_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let defaults = DemoDefaults::default();
        let demo = DemoDefaults {
            total_items: parse_var(&lookup, "PAGEWIN_TOTAL_ITEMS", defaults.total_items)?,
            page_size: parse_var(&lookup, "PAGEWIN_PAGE_SIZE", defaults.page_size)?,
            window_size: parse_var(&lookup, "PAGEWIN_WINDOW_SIZE", defaults.window_size)?,
        };

        let session_timeout_secs = parse_var(
            &lookup,
            "PAGEWIN_SESSION_TIMEOUT_SECS",
            DEFAULT_SESSION_TIMEOUT_SECS,
        )?;
        if session_timeout_secs == 0 {
            bail!("PAGEWIN_SESSION_TIMEOUT_SECS must be at least 1");
        }

        let config = Self {
            discord_token,
            demo,
            session_timeout_secs,
        };
        debug!(?config, "configuration loaded");
        Ok(config)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be an unsigned integer, got `{raw}`")),
        None => Ok(default),
    }
}
