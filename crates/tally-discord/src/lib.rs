//! Discord adapter (serenity).
//!
//! This crate implements the `tally-core` messaging and roster ports over the
//! Discord gateway and REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ChannelId as DiscordChannelId, Http};

pub mod handlers;
pub mod roster;
pub mod router;

use tally_core::{
    domain::{ChannelId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::MessagingCapabilities},
    Result,
};

/// Discord's hard limit on message content length.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

#[derive(Clone)]
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    fn dc_channel(channel_id: ChannelId) -> DiscordChannelId {
        DiscordChannelId::new(channel_id.0)
    }
}

pub(crate) fn map_err(e: serenity::Error) -> Error {
    Error::Discord(e.to_string())
}

#[async_trait]
impl MessagingPort for DiscordMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: DISCORD_MESSAGE_LIMIT,
        }
    }

    async fn send_text(&self, channel_id: ChannelId, text: &str) -> Result<MessageRef> {
        let msg = Self::dc_channel(channel_id)
            .say(&*self.http, text)
            .await
            .map_err(map_err)?;

        Ok(MessageRef {
            channel_id,
            message_id: MessageId(msg.id.get()),
        })
    }
}
