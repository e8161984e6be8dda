//! Prefix commands: `activity` and `allactivity`.

mod activity;
mod allactivity;

pub use activity::handle_activity;
pub use allactivity::handle_all_activity;

use crate::messaging::types::CommandName;

pub const MULTIPLE_USERS: &str =
    "Found **multiple** users with that name. Please mention the exact user or use their ID.";
pub const USER_NOT_FOUND: &str = "Could not find a user with that name, mention, or ID.";
pub const NO_ACTIVITY: &str = "No activity recorded yet.";
pub const COMMAND_FAILED: &str =
    "Sorry, something went wrong while looking that up. Please try again later.";
pub const GUILD_ONLY: &str = "This command only works inside a server.";

/// Split `!name rest of line` into a known command and its trimmed argument.
///
/// Returns `None` for text without the prefix or with an unknown command name.
pub fn parse_command(prefix: &str, text: &str) -> Option<(CommandName, Option<String>)> {
    let body = text.strip_prefix(prefix)?;
    let mut parts = body.splitn(2, char::is_whitespace);
    let name = CommandName::parse(parts.next().unwrap_or(""))?;
    let args = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some((name, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands_with_args() {
        assert_eq!(
            parse_command("!", "!activity"),
            Some((CommandName::Activity, None))
        );
        assert_eq!(
            parse_command("!", "!activity   Bob the Builder  "),
            Some((CommandName::Activity, Some("Bob the Builder".to_string())))
        );
        assert_eq!(
            parse_command("!", "!allactivity"),
            Some((CommandName::AllActivity, None))
        );
        assert_eq!(
            parse_command("?", "?activity\n<@123>"),
            Some((CommandName::Activity, Some("<@123>".to_string())))
        );
    }

    #[test]
    fn ignores_plain_text_and_unknown_commands() {
        assert_eq!(parse_command("!", "hello there"), None);
        assert_eq!(parse_command("!", "!help"), None);
        assert_eq!(parse_command("!", "!Activity"), None);
        assert_eq!(parse_command("!", "!activityx"), None);
        assert_eq!(parse_command("!", " !activity"), None);
        assert_eq!(parse_command("!", "!"), None);
    }
}
