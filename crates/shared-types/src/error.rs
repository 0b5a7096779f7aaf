use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of guard errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum GuardErrorKind {
    /// The credential-state subscription never produced a signed-in or
    /// signed-out state.
    IdentityUnavailable,
    ClaimsUnavailable,
    TierUpdateFailure,
    Transport,
    Config,
}

impl fmt::Display for GuardErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardErrorKind::IdentityUnavailable => write!(f, "IdentityUnavailable"),
            GuardErrorKind::ClaimsUnavailable => write!(f, "ClaimsUnavailable"),
            GuardErrorKind::TierUpdateFailure => write!(f, "TierUpdateFailure"),
            GuardErrorKind::Transport => write!(f, "Transport"),
            GuardErrorKind::Config => write!(f, "Config"),
        }
    }
}

/// Structured error shared by the guard and its adapters.
///
/// None of these reach the navigation system: the guard logs them and
/// degrades to a signed-out or unchanged-claims decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardError {
    pub kind: GuardErrorKind,
    pub message: String,
}

impl GuardError {
    pub fn identity_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: GuardErrorKind::IdentityUnavailable,
            message: message.into(),
        }
    }

    pub fn claims_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: GuardErrorKind::ClaimsUnavailable,
            message: message.into(),
        }
    }

    pub fn tier_update(message: impl Into<String>) -> Self {
        Self {
            kind: GuardErrorKind::TierUpdateFailure,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: GuardErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: GuardErrorKind::Config,
            message: message.into(),
        }
    }
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GuardError {}
