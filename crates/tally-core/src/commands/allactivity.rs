use std::collections::HashMap;

use crate::{
    activity::ActivityTracker,
    domain::{ActivityRecord, GroupMember},
    Result,
};

use super::NO_ACTIVITY;

/// `!allactivity`: leaderboard of the top `limit` counters.
///
/// Ties on count are ordered by user id so the output is deterministic.
pub async fn handle_all_activity(
    tracker: &ActivityTracker,
    members: &[GroupMember],
    limit: usize,
) -> Result<String> {
    let mut rows = tracker.list_all().await?;
    if rows.is_empty() {
        return Ok(NO_ACTIVITY.to_string());
    }

    rank(&mut rows);

    let by_id: HashMap<String, &GroupMember> =
        members.iter().map(|m| (m.id.to_string(), m)).collect();

    let lines = rows
        .iter()
        .take(limit)
        .map(|r| match by_id.get(&r.user_id) {
            Some(m) => format!("{}: {} messages", m.display_name, r.count),
            None => format!("User ID {}: {} messages", r.user_id, r.count),
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!("**Activity Leaderboard**\n{lines}"))
}

fn rank(rows: &mut [ActivityRecord]) {
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}
