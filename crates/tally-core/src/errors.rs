/// Core error type for the activity bot.
///
/// Adapter crates map their specific errors into this type so the event
/// boundary can decide between "log and move on" and "apologize to the user".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error during {op}: {reason}")]
    Store { op: &'static str, reason: String },

    #[error("discord error: {0}")]
    Discord(String),
}

impl Error {
    pub fn store(op: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Store {
            op,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
