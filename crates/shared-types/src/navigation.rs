use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route paths the guard redirects to or matches against.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const CONFIRM_EMAIL: &str = "/confirmemail";
    pub const PAYMENT: &str = "/payment";
    pub const ACCOUNT: &str = "/account";
    pub const ACCOUNT_PAYMENT_SUCCESS: &str = "/account?success=true";
    pub const PRIMARY_SETTINGS: &str = "/account/primarysettings";
    /// Legacy settings page. Matched case-sensitively.
    pub const LEG_SETTINGS: &str = "/Account/LegSettings";
}

/// One navigation attempt: where the user is coming from and going to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NavigationIntent {
    pub destination_path: String,
    pub origin_path: String,
    #[serde(default)]
    pub destination_query: BTreeMap<String, String>,
    #[serde(default)]
    pub origin_query: BTreeMap<String, String>,
}

impl NavigationIntent {
    /// Build an intent from two location strings such as `/payment?success=true`.
    pub fn from_locations(destination: &str, origin: &str) -> Self {
        let (destination_path, destination_query) = split_location(destination);
        let (origin_path, origin_query) = split_location(origin);
        Self {
            destination_path,
            origin_path,
            destination_query,
            origin_query,
        }
    }

    pub fn destination_param(&self, key: &str) -> Option<&str> {
        self.destination_query.get(key).map(String::as_str)
    }

    pub fn origin_param(&self, key: &str) -> Option<&str> {
        self.origin_query.get(key).map(String::as_str)
    }
}

/// Split `path?query#fragment` into the path and its decoded query pairs.
///
/// Keys without `=` map to an empty value. Later duplicates win.
pub fn split_location(location: &str) -> (String, BTreeMap<String, String>) {
    let without_fragment = location.split('#').next().unwrap_or_default();
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    };

    let mut params = BTreeMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode_component(key), decode_component(value));
    }

    let path = if path.is_empty() { "/" } else { path };
    (path.to_string(), params)
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Let the navigation continue to its destination.
    Proceed,
    /// Navigate to this path instead.
    Redirect(String),
}

impl RedirectDecision {
    pub fn redirect(path: impl Into<String>) -> Self {
        RedirectDecision::Redirect(path.into())
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            RedirectDecision::Proceed => None,
            RedirectDecision::Redirect(path) => Some(path),
        }
    }

    /// Whether a host at `location` should render it. A redirect back to
    /// the location being visited is treated as proceed; locations are
    /// compared by path and decoded query, so `/account?` equals `/account`.
    pub fn lets_through(&self, location: &str) -> bool {
        self.target()
            .map_or(true, |target| split_location(target) == split_location(location))
    }
}

/// Guard progress as seen by the page host.
///
/// Replaces a process-wide loading flag: the host renders a placeholder
/// while `Pending` and applies the decision once `Resolved`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Pending,
    Resolved(RedirectDecision),
}

impl GuardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GuardState::Pending)
    }

    pub fn decision(&self) -> Option<&RedirectDecision> {
        match self {
            GuardState::Pending => None,
            GuardState::Resolved(decision) => Some(decision),
        }
    }
}
