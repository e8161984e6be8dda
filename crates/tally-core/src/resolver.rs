//! Maps free-form command input (mention, numeric id or name) to a guild member.

use crate::domain::{GroupMember, UserId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(GroupMember),
    /// More than one member matched by name; the caller must not guess.
    Ambiguous { candidates: usize },
    NotFound,
}

/// Resolve `input` against `members`, falling back to `default` when no input is given.
///
/// Tried in order: mention markup (`<@123>`, `<@!123>`), bare numeric id, then
/// case-insensitive exact match on username or display name.
pub fn resolve(input: Option<&str>, default: &GroupMember, members: &[GroupMember]) -> Resolution {
    let input = match input.map(str::trim) {
        None | Some("") => return Resolution::Found(default.clone()),
        Some(s) => s,
    };

    let mention_id = strip_mention(input);
    if let Some(m) = parse_id(mention_id).and_then(|id| find_by_id(members, id)) {
        return Resolution::Found(m.clone());
    }

    if let Some(m) = parse_id(input).and_then(|id| find_by_id(members, id)) {
        return Resolution::Found(m.clone());
    }

    let needle = input.to_lowercase();
    let matches: Vec<&GroupMember> = members
        .iter()
        .filter(|m| m.name.to_lowercase() == needle || m.display_name.to_lowercase() == needle)
        .collect();

    match matches.as_slice() {
        [] => Resolution::NotFound,
        [one] => Resolution::Found((*one).clone()),
        many => Resolution::Ambiguous {
            candidates: many.len(),
        },
    }
}

fn strip_mention(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, '<' | '@' | '!' | '>'))
}

fn parse_id(s: &str) -> Option<UserId> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u64>().ok().map(UserId)
}

fn find_by_id(members: &[GroupMember], id: UserId) -> Option<&GroupMember> {
    members.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: u64, name: &str, display_name: &str) -> GroupMember {
        GroupMember {
            id: UserId(id),
            name: name.to_string(),
            display_name: display_name.to_string(),
        }
    }

    fn roster() -> Vec<GroupMember> {
        vec![
            member(123, "alice", "Alice A."),
            member(456, "bob_the_builder", "Bob"),
            member(789, "carol", "carol"),
        ]
    }

    #[test]
    fn empty_input_defaults_to_invoker() {
        let me = member(1, "me", "Me");
        assert_eq!(resolve(None, &me, &roster()), Resolution::Found(me.clone()));
        assert_eq!(resolve(Some(""), &me, &roster()), Resolution::Found(me.clone()));
        assert_eq!(resolve(Some("   "), &me, &roster()), Resolution::Found(me));
    }

    #[test]
    fn mention_forms_resolve_by_id() {
        let me = member(1, "me", "Me");
        let alice = roster()[0].clone();
        assert_eq!(resolve(Some("<@!123>"), &me, &roster()), Resolution::Found(alice.clone()));
        assert_eq!(resolve(Some("<@123>"), &me, &roster()), Resolution::Found(alice));
    }

    #[test]
    fn bare_id_resolves() {
        let me = member(1, "me", "Me");
        assert_eq!(
            resolve(Some("456"), &me, &roster()),
            Resolution::Found(roster()[1].clone())
        );
    }

    #[test]
    fn unknown_id_falls_through_to_name_match() {
        let me = member(1, "me", "Me");
        assert_eq!(resolve(Some("999"), &me, &roster()), Resolution::NotFound);

        // A member literally named "999" is found by the name step.
        let mut members = roster();
        members.push(member(5, "999", "Nines"));
        assert_eq!(
            resolve(Some("999"), &me, &members),
            Resolution::Found(member(5, "999", "Nines"))
        );
    }

    #[test]
    fn name_match_is_case_insensitive_on_both_fields() {
        let me = member(1, "me", "Me");
        assert_eq!(
            resolve(Some("BOB"), &me, &roster()),
            Resolution::Found(roster()[1].clone())
        );
        assert_eq!(
            resolve(Some("Bob_The_Builder"), &me, &roster()),
            Resolution::Found(roster()[1].clone())
        );
        // Same value in name and display_name counts once.
        assert_eq!(
            resolve(Some("Carol"), &me, &roster()),
            Resolution::Found(roster()[2].clone())
        );
    }

    #[test]
    fn name_collision_across_accounts_is_ambiguous() {
        let me = member(1, "me", "Me");
        let members = vec![member(10, "Alex", "Alexander"), member(11, "xander", "Alex")];
        assert_eq!(
            resolve(Some("alex"), &me, &members),
            Resolution::Ambiguous { candidates: 2 }
        );
    }

    #[test]
    fn no_match_is_not_found() {
        let me = member(1, "me", "Me");
        assert_eq!(resolve(Some("nobody"), &me, &roster()), Resolution::NotFound);
        assert_eq!(resolve(Some("<@>"), &me, &roster()), Resolution::NotFound);
    }

    #[test]
    fn oversized_numbers_are_not_ids() {
        let me = member(1, "me", "Me");
        assert_eq!(
            resolve(Some("99999999999999999999999"), &me, &roster()),
            Resolution::NotFound
        );
    }
}
