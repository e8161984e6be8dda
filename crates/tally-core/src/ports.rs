use async_trait::async_trait;

use crate::{
    domain::{ActivityRecord, GroupMember},
    Result,
};

/// The remote `user_activity` table.
///
/// Exactly the four operations the bot needs: select-by-key, select-all,
/// insert-row and update-by-key. Failures are reported as `Error::Store`.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<Option<ActivityRecord>>;

    async fn fetch_all(&self) -> Result<Vec<ActivityRecord>>;

    async fn insert(&self, record: &ActivityRecord) -> Result<()>;

    async fn update_count(&self, user_id: &str, count: u64) -> Result<()>;
}

/// Live membership list of the guild an event belongs to.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn members(&self) -> Result<Vec<GroupMember>>;
}
