use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_TABLE: &str = "user_activity";
pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_LEADERBOARD_SIZE: usize = 20;

/// Typed configuration for the bot.
///
/// Only the bot token is validated; a bad store endpoint surfaces as a store
/// error on first use.
#[derive(Clone, Debug)]
pub struct Config {
    // Discord
    pub bot_token: String,
    pub command_prefix: String,

    // Table store
    pub supabase_url: String,
    pub supabase_key: String,
    pub activity_table: String,
    pub store_timeout: Duration,

    // Commands
    pub leaderboard_size: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process env in `load`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("BOT_TOKEN not found in environment variables.".to_string())
            })?;

        let command_prefix = lookup("COMMAND_PREFIX")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let supabase_url = lookup("SUPABASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();
        // The anon key is the usual choice; a service role key works too.
        let supabase_key = lookup("SUPABASE_ANON_KEY")
            .and_then(non_empty)
            .or_else(|| lookup("SUPABASE_SERVICE_ROLE_KEY").and_then(non_empty))
            .unwrap_or_default();
        let activity_table = lookup("ACTIVITY_TABLE")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let store_timeout = Duration::from_millis(
            lookup("STORE_TIMEOUT_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(10_000),
        );

        let leaderboard_size = lookup("LEADERBOARD_SIZE")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LEADERBOARD_SIZE);

        Ok(Self {
            bot_token,
            command_prefix,
            supabase_url,
            supabase_key,
            activity_table,
            store_timeout,
            leaderboard_size,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("SUPABASE_URL", "https://x")])).unwrap_err();
        match err {
            Error::Config(msg) => {
                assert_eq!(msg, "BOT_TOKEN not found in environment variables.")
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "   ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let cfg = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "tok")])).unwrap();
        assert_eq!(cfg.bot_token, "tok");
        assert_eq!(cfg.command_prefix, "!");
        assert_eq!(cfg.activity_table, "user_activity");
        assert_eq!(cfg.leaderboard_size, 20);
        assert_eq!(cfg.store_timeout, Duration::from_secs(10));
        assert!(cfg.supabase_url.is_empty());
        assert!(cfg.supabase_key.is_empty());
    }

    #[test]
    fn store_settings_and_key_fallback() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "tok"),
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
            ("LEADERBOARD_SIZE", "0"),
            ("COMMAND_PREFIX", "?"),
        ]))
        .unwrap();
        assert_eq!(cfg.supabase_url, "https://abc.supabase.co");
        assert_eq!(cfg.supabase_key, "service");
        assert_eq!(cfg.leaderboard_size, 20);
        assert_eq!(cfg.command_prefix, "?");

        let cfg = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "tok"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ]))
        .unwrap();
        assert_eq!(cfg.supabase_key, "anon");
    }

    #[test]
    fn dotenv_parsing_handles_quotes_and_comments() {
        let parsed = parse_dotenv(
            "# comment\nBOT_TOKEN=\"abc\"\n\nexport SUPABASE_URL='https://x'\nbroken line\n=novalue\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("BOT_TOKEN".to_string(), "abc".to_string()),
                ("SUPABASE_URL".to_string(), "https://x".to_string()),
            ]
        );
    }
}
