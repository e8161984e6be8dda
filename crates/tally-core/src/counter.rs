use std::sync::Arc;

use crate::{activity::ActivityTracker, domain::UserId, Result};

/// Counts every inbound message that the bot did not write itself.
pub struct MessageCounter {
    tracker: Arc<ActivityTracker>,
}

impl MessageCounter {
    pub fn new(tracker: Arc<ActivityTracker>) -> Self {
        Self { tracker }
    }

    pub async fn on_message(&self, sender: UserId, is_self: bool) -> Result<()> {
        if is_self {
            return Ok(());
        }
        let count = self.tracker.increment(&sender.to_string()).await?;
        tracing::debug!(user_id = sender.0, count, "message counted");
        Ok(())
    }
}
