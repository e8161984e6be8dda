use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{GuildId as DiscordGuildId, Http, Member, UserId as DiscordUserId};

use tally_core::{
    domain::{GroupMember, GuildId, UserId},
    ports::MemberDirectory,
    Result,
};

use crate::map_err;

/// Maximum page size of `GET /guilds/{id}/members`.
const MEMBERS_PAGE_SIZE: u64 = 1000;

/// Live member list of one guild, fetched over REST on demand.
///
/// Requires the privileged `GUILD_MEMBERS` intent to be enabled for the bot.
pub struct GuildRoster {
    http: Arc<Http>,
    guild_id: Option<GuildId>,
}

impl GuildRoster {
    pub fn new(http: Arc<Http>, guild_id: Option<GuildId>) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl MemberDirectory for GuildRoster {
    async fn members(&self) -> Result<Vec<GroupMember>> {
        let Some(guild_id) = self.guild_id else {
            return Ok(Vec::new());
        };
        let guild = DiscordGuildId::new(guild_id.0);

        let mut out = Vec::new();
        let mut after: Option<DiscordUserId> = None;
        loop {
            let page = guild
                .members(&*self.http, Some(MEMBERS_PAGE_SIZE), after)
                .await
                .map_err(map_err)?;
            let len = page.len();
            after = page.last().map(|m| m.user.id);
            out.extend(page.iter().map(to_group_member));
            if (len as u64) < MEMBERS_PAGE_SIZE {
                break;
            }
        }

        tracing::debug!(guild_id = guild_id.0, members = out.len(), "fetched guild roster");
        Ok(out)
    }
}

fn to_group_member(m: &Member) -> GroupMember {
    GroupMember {
        id: UserId(m.user.id.get()),
        name: m.user.name.clone(),
        display_name: m.display_name().to_string(),
    }
}
