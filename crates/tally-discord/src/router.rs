use std::sync::Arc;

use anyhow::Context as _;
use serenity::all::{Client, GatewayIntents};

use tally_core::{bot::ActivityBot, config::Config};

use crate::handlers::Handler;

pub struct AppState {
    pub cfg: Arc<Config>,
    pub bot: Arc<ActivityBot>,
}

/// Intents the bot needs: message events with content, and the member list
/// for name lookups.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS
}

/// Connect to the gateway and process events until Ctrl-C or a fatal client error.
pub async fn run(cfg: Arc<Config>, bot: Arc<ActivityBot>) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        bot,
    });

    tracing::info!(
        prefix = %state.cfg.command_prefix,
        table = %state.cfg.activity_table,
        "starting discord client"
    );

    let mut client = Client::builder(&cfg.bot_token, intents())
        .event_handler(Handler::new(state))
        .await
        .context("failed to create discord client")?;

    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested, closing gateway connection");
            shard_manager.shutdown_all().await;
        }
        result = client.start() => {
            result.context("discord client error")?;
            tracing::info!("discord client stopped");
        }
    }

    Ok(())
}
