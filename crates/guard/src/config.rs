use shared_types::{AppConfig, GuardError};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` and the environment, and store the result in the
/// global `OnceLock`. Safe to call multiple times; only the first call has
/// effect.
///
/// A missing or unparseable file falls back to defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();

        let mut config = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Using default guard config");
                AppConfig::default()
            }),
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
                AppConfig::default()
            }
        };
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        tracing::debug!(?config, "Guard config loaded");
        config
    })
}

/// Get the loaded config. Returns defaults if `load_config()` hasn't been
/// called yet.
pub fn config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn parse_config(contents: &str) -> Result<AppConfig, GuardError> {
    toml::from_str(contents).map_err(|e| GuardError::config(e.to_string()))
}

/// Overlay environment variables on top of the file config.
///
/// - `GUARD_TIER_UPDATE_DEBOUNCE_MS`
/// - `GUARD_IDENTITY_TIMEOUT_MS`
/// - `IDENTITY_BASE_URL`
/// - `FUNCTIONS_BASE_URL`
///
/// Numeric values that don't parse are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(ms) = parse_millis(&lookup, "GUARD_TIER_UPDATE_DEBOUNCE_MS") {
        config.guard.tier_update_debounce_ms = ms;
    }
    if let Some(ms) = parse_millis(&lookup, "GUARD_IDENTITY_TIMEOUT_MS") {
        config.guard.identity_timeout_ms = ms;
    }
    if let Some(url) = lookup("IDENTITY_BASE_URL").filter(|v| !v.is_empty()) {
        config.endpoints.identity_base_url = url;
    }
    if let Some(url) = lookup("FUNCTIONS_BASE_URL").filter(|v| !v.is_empty()) {
        config.endpoints.functions_base_url = url;
    }
}

fn parse_millis<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring non-numeric override");
            None
        }
    }
}
