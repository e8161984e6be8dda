use crate::{
    activity::ActivityTracker,
    domain::GroupMember,
    resolver::{resolve, Resolution},
    Result,
};

use super::{MULTIPLE_USERS, USER_NOT_FOUND};

/// `!activity [user]`: message count of one member, the invoker by default.
pub async fn handle_activity(
    tracker: &ActivityTracker,
    raw_arg: Option<&str>,
    invoker: &GroupMember,
    members: &[GroupMember],
) -> Result<String> {
    let target = match resolve(raw_arg, invoker, members) {
        Resolution::Found(m) => m,
        Resolution::Ambiguous { candidates } => {
            tracing::debug!(candidates, input = ?raw_arg, "ambiguous activity lookup");
            return Ok(MULTIPLE_USERS.to_string());
        }
        Resolution::NotFound => return Ok(USER_NOT_FOUND.to_string()),
    };

    let count = tracker.get_count(&target.id.to_string()).await?;
    Ok(format!(
        "{} has sent **{count}** messages so far!",
        target.id.mention()
    ))
}
