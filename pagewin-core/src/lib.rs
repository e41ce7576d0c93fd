use std::sync::Arc;

use twilight_http::Client;

pub mod config;

pub use config::{Config, DemoDefaults};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub config: Arc<Config>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, config: Config) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }
}
