use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use pagewin_commands::{handle_interaction, handle_message};
use pagewin_core::{Config, Context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let config = Config::from_env()?;
    let token = config.discord_token.clone();
    info!(
        total_items = config.demo.total_items,
        page_size = config.demo.page_size,
        window_size = config.demo.window_size,
        session_timeout_secs = config.session_timeout_secs,
        "demo defaults"
    );

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let ctx = Context::new(Arc::clone(&http), config);

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    let wanted = EventTypeFlags::READY
        | EventTypeFlags::MESSAGE_CREATE
        | EventTypeFlags::INTERACTION_CREATE;

    info!("pagewin is connecting...");

    while let Some(item) = shard.next_event(wanted).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        let outcome = match event {
            Event::Ready(_) => {
                info!("pagewin is ready");
                Ok(())
            }
            Event::MessageCreate(msg) => handle_message(ctx.clone(), msg).await,
            Event::InteractionCreate(interaction) => {
                handle_interaction(ctx.clone(), interaction).await
            }
            _ => Ok(()),
        };

        // Handler errors end that command only, never the event loop.
        if let Err(source) = outcome {
            warn!(error = ?source, "event handler failed");
        }
    }

    Ok(())
}
