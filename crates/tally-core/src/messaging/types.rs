use crate::domain::{ChannelId, GroupMember, GuildId, UserId};

/// Everything the gateway can hand to the bot.
#[derive(Clone, Debug)]
pub enum InboundEvent {
    Ready { bot_name: String, bot_id: UserId },
    Message(MessageEvent),
    CommandInvocation(CommandInvocation),
}

/// Author of an inbound message.
#[derive(Clone, Debug)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
    pub is_bot: bool,
}

impl Author {
    pub fn as_member(&self) -> GroupMember {
        GroupMember {
            id: self.id,
            name: self.name.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageEvent {
    pub author: Author,
    /// True when the bot itself authored the message.
    pub is_self: bool,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandName {
    Activity,
    AllActivity,
}

impl CommandName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "activity" => Some(Self::Activity),
            "allactivity" => Some(Self::AllActivity),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::AllActivity => "allactivity",
        }
    }
}

/// A recognized command plus the context it was issued in.
#[derive(Clone, Debug)]
pub struct CommandInvocation {
    pub name: CommandName,
    /// Remainder of the message after the command name, trimmed; `None` when empty.
    pub args: Option<String>,
    pub invoker: Author,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}

/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}
