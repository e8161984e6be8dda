//! Event boundary: counting, command dispatch and reply delivery.

use std::sync::Arc;

use crate::{
    activity::ActivityTracker,
    commands::{self, parse_command, COMMAND_FAILED, GUILD_ONLY},
    config::Config,
    counter::MessageCounter,
    domain::ChannelId,
    formatting::split_message,
    messaging::{
        port::MessagingPort,
        types::{CommandInvocation, CommandName, InboundEvent, MessageEvent},
    },
    ports::{MemberDirectory, TableStore},
    Result,
};

pub struct ActivityBot {
    tracker: Arc<ActivityTracker>,
    counter: MessageCounter,
    command_prefix: String,
    leaderboard_size: usize,
}

impl ActivityBot {
    pub fn new(cfg: &Config, store: Arc<dyn TableStore>) -> Self {
        let tracker = Arc::new(ActivityTracker::new(store));
        Self {
            counter: MessageCounter::new(tracker.clone()),
            tracker,
            command_prefix: cfg.command_prefix.clone(),
            leaderboard_size: cfg.leaderboard_size,
        }
    }

    /// Handle one gateway event to completion.
    ///
    /// Never fails: store errors are logged (counting) or turned into an
    /// apology (commands), and send failures are logged.
    pub async fn handle(
        &self,
        event: InboundEvent,
        roster: &dyn MemberDirectory,
        messenger: &dyn MessagingPort,
    ) {
        match event {
            InboundEvent::Ready { bot_name, bot_id } => {
                tracing::info!("Logged in as {bot_name} (ID: {bot_id})");
            }
            InboundEvent::Message(msg) => self.on_message(msg, roster, messenger).await,
            InboundEvent::CommandInvocation(cmd) => self.on_command(cmd, roster, messenger).await,
        }
    }

    async fn on_message(
        &self,
        msg: MessageEvent,
        roster: &dyn MemberDirectory,
        messenger: &dyn MessagingPort,
    ) {
        if let Err(e) = self.counter.on_message(msg.author.id, msg.is_self).await {
            tracing::warn!(user_id = msg.author.id.0, "failed to count message: {e}");
        }

        // Bots (including ourselves) can be counted but never issue commands.
        if msg.is_self || msg.author.is_bot {
            return;
        }

        let Some((name, args)) = parse_command(&self.command_prefix, &msg.content) else {
            return;
        };

        let cmd = CommandInvocation {
            name,
            args,
            invoker: msg.author,
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
        };
        self.on_command(cmd, roster, messenger).await;
    }

    async fn on_command(
        &self,
        cmd: CommandInvocation,
        roster: &dyn MemberDirectory,
        messenger: &dyn MessagingPort,
    ) {
        tracing::info!(
            command = cmd.name.as_str(),
            user_id = cmd.invoker.id.0,
            "command received"
        );

        let reply = match self.run_command(&cmd, roster).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(command = cmd.name.as_str(), "command failed: {e}");
                COMMAND_FAILED.to_string()
            }
        };

        if let Err(e) = send_split(messenger, cmd.channel_id, &reply).await {
            tracing::error!(command = cmd.name.as_str(), "failed to send reply: {e}");
        }
    }

    async fn run_command(
        &self,
        cmd: &CommandInvocation,
        roster: &dyn MemberDirectory,
    ) -> Result<String> {
        if cmd.guild_id.is_none() {
            return Ok(GUILD_ONLY.to_string());
        }

        match cmd.name {
            CommandName::Activity => {
                // A bare `activity` resolves to the invoker; no roster needed.
                let members = match cmd.args {
                    Some(_) => roster.members().await?,
                    None => Vec::new(),
                };
                commands::handle_activity(
                    &self.tracker,
                    cmd.args.as_deref(),
                    &cmd.invoker.as_member(),
                    &members,
                )
                .await
            }
            CommandName::AllActivity => {
                let members = roster.members().await?;
                commands::handle_all_activity(&self.tracker, &members, self.leaderboard_size).await
            }
        }
    }
}

async fn send_split(messenger: &dyn MessagingPort, channel_id: ChannelId, text: &str) -> Result<()> {
    let limit = messenger.capabilities().max_message_len;
    for chunk in split_message(text, limit) {
        messenger.send_text(channel_id, &chunk).await?;
    }
    Ok(())
}
