use async_trait::async_trait;

use crate::{
    domain::{ChannelId, MessageRef},
    messaging::types::MessagingCapabilities,
    Result,
};

/// Outbound side of the chat gateway.
///
/// Replies are plain text scoped to the channel the triggering event came from.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, channel_id: ChannelId, text: &str) -> Result<MessageRef>;
}
