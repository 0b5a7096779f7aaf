use dioxus::prelude::*;
use guard::{HttpIdentityProvider, HttpRouteGuard};
use shared_types::{AppConfig, Credential};
use std::sync::Arc;

/// Identity and guard handles shared by every route.
#[derive(Clone)]
pub struct AuthState {
    pub provider: Arc<HttpIdentityProvider>,
    pub guard: Arc<HttpRouteGuard>,
    /// Last location the guard let through. Origin of the next navigation.
    pub previous_location: Signal<String>,
}

impl AuthState {
    pub fn new(config: &AppConfig) -> Self {
        let (provider, guard) = guard::http_guard(config);
        Self {
            provider,
            guard: Arc::new(guard),
            previous_location: Signal::new(String::from("/")),
        }
    }

    pub fn sign_in(&self, credential: Credential) {
        self.provider.set_credential(credential);
    }

    pub fn sign_out(&self) {
        self.provider.sign_out();
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}
