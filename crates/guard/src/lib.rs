pub mod callable;
pub mod config;
pub mod debounce;
pub mod identity;
pub mod route_guard;
pub mod rules;
pub mod tier_updater;

pub use callable::{CallableTierService, TierService};
pub use identity::{HttpIdentityProvider, IdentityProvider};
pub use route_guard::RouteGuard;
pub use tier_updater::TierUpdater;

use shared_types::AppConfig;
use std::sync::Arc;

/// Route guard wired to the HTTP identity provider and callable backend.
pub type HttpRouteGuard = RouteGuard<HttpIdentityProvider, CallableTierService>;

/// Build the HTTP-backed guard from config. The returned provider handle is
/// what the host uses to sign users in and out.
pub fn http_guard(config: &AppConfig) -> (Arc<HttpIdentityProvider>, HttpRouteGuard) {
    let provider = Arc::new(HttpIdentityProvider::new(
        config.endpoints.identity_base_url.clone(),
    ));
    let service = CallableTierService::new(config.endpoints.functions_base_url.clone());
    let guard = RouteGuard::new(provider.clone(), service, &config.guard);
    (provider, guard)
}
