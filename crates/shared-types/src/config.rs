use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_debounce_ms() -> u64 {
    1000
}

fn default_identity_timeout_ms() -> u64 {
    10_000
}

fn default_identity_base_url() -> String {
    "http://localhost:9099".to_string()
}

fn default_functions_base_url() -> String {
    "http://localhost:5001".to_string()
}

/// Timing knobs for the route guard.
///
/// Every field has a default so a missing or partial `[guard]` table
/// still yields a working guard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardConfig {
    /// Quiet window for coalescing tier-update requests.
    #[serde(default = "default_debounce_ms")]
    pub tier_update_debounce_ms: u64,
    /// How long a navigation waits for the identity provider to report a state.
    #[serde(default = "default_identity_timeout_ms")]
    pub identity_timeout_ms: u64,
}

impl GuardConfig {
    pub fn tier_update_debounce(&self) -> Duration {
        Duration::from_millis(self.tier_update_debounce_ms)
    }

    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(self.identity_timeout_ms)
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            tier_update_debounce_ms: default_debounce_ms(),
            identity_timeout_ms: default_identity_timeout_ms(),
        }
    }
}

/// Base URLs of the identity provider and the callable functions host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    #[serde(default = "default_identity_base_url")]
    pub identity_base_url: String,
    #[serde(default = "default_functions_base_url")]
    pub functions_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            identity_base_url: default_identity_base_url(),
            functions_base_url: default_functions_base_url(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}
