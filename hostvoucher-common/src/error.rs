// ================================================================
// File: hostvoucher-common/src/error.rs
// ================================================================

use thiserror::Error;
use crate::models::action::ActionKind;

#[derive(Debug, Error)]
pub enum Error {
    // Rejections: a precondition was not met, nothing changed.
    #[error("Points mining is not activated")]
    NotActivated,

    #[error("Still cooling down: {kind} reward for '{subject}' available in {remaining_ms} ms")]
    OnCooldown {
        kind: ActionKind,
        subject: String,
        remaining_ms: i64,
    },

    #[error("Insufficient points for '{badge}': need {price}, have {available}")]
    InsufficientPoints {
        badge: String,
        price: u64,
        available: u64,
    },

    #[error("Badge already owned: {0}")]
    AlreadyOwned(String),

    #[error("Unknown badge: {0}")]
    UnknownBadge(String),

    #[error("Badge cannot be purchased: {0}")]
    NotPurchasable(String),

    // Infrastructure failures:
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Event bus error: {0}")]
    EventBus(String),
}

impl Error {
    /// True for the user-facing rejections (cooldown, not activated, purchase
    /// preconditions). Callers show these as notices rather than failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::NotActivated
                | Error::OnCooldown { .. }
                | Error::InsufficientPoints { .. }
                | Error::AlreadyOwned(_)
                | Error::UnknownBadge(_)
                | Error::NotPurchasable(_)
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<chrono::format::ParseError> for Error {
    fn from(err: chrono::format::ParseError) -> Self {
        Error::Parse(err.to_string())
    }
}
