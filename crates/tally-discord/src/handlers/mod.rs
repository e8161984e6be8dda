//! Gateway event handling.
//!
//! Translates serenity events into `InboundEvent`s and hands them to the core
//! bot together with a roster and messenger bound to the event's context.

use std::sync::{Arc, OnceLock};

use serenity::all::{Context, EventHandler, Message, Ready};

use tally_core::{
    domain::{ChannelId, GuildId, UserId},
    messaging::types::{Author, InboundEvent, MessageEvent},
};

use crate::{roster::GuildRoster, router::AppState, DiscordMessenger};

pub struct Handler {
    state: Arc<AppState>,
    bot_user_id: OnceLock<u64>,
}

impl Handler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            bot_user_id: OnceLock::new(),
        }
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let event = InboundEvent::Message(to_message_event(&msg, self.bot_user_id.get().copied()));
        let guild_id = msg.guild_id.map(|g| GuildId(g.get()));

        let roster = GuildRoster::new(ctx.http.clone(), guild_id);
        let messenger = DiscordMessenger::new(ctx.http.clone());
        self.state.bot.handle(event, &roster, &messenger).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        // Reconnects deliver Ready again with the same user.
        let _ = self.bot_user_id.set(ready.user.id.get());

        let event = InboundEvent::Ready {
            bot_name: ready.user.name.clone(),
            bot_id: UserId(ready.user.id.get()),
        };
        let roster = GuildRoster::new(ctx.http.clone(), None);
        let messenger = DiscordMessenger::new(ctx.http.clone());
        self.state.bot.handle(event, &roster, &messenger).await;
    }
}

fn to_message_event(msg: &Message, bot_user_id: Option<u64>) -> MessageEvent {
    let author_id = msg.author.id.get();
    let nick = msg.member.as_ref().and_then(|m| m.nick.as_deref());

    MessageEvent {
        author: Author {
            id: UserId(author_id),
            name: msg.author.name.clone(),
            display_name: display_name(nick, msg.author.global_name.as_deref(), &msg.author.name),
            is_bot: msg.author.bot,
        },
        is_self: is_self(bot_user_id, author_id),
        channel_id: ChannelId(msg.channel_id.get()),
        guild_id: msg.guild_id.map(|g| GuildId(g.get())),
        content: msg.content.clone(),
    }
}

/// Guild nickname, then global display name, then username.
fn display_name(nick: Option<&str>, global_name: Option<&str>, name: &str) -> String {
    nick.or(global_name).unwrap_or(name).to_string()
}

fn is_self(bot_user_id: Option<u64>, author_id: u64) -> bool {
    bot_user_id == Some(author_id)
}
