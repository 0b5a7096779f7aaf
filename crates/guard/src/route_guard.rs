use shared_types::{
    Claims, Credential, CredentialState, GuardConfig, GuardError, GuardState, NavigationIntent,
    RedirectDecision,
};
use std::sync::Arc;
use std::time::Duration;

use crate::callable::TierService;
use crate::identity::IdentityProvider;
use crate::rules;
use crate::tier_updater::TierUpdater;

/// Per-navigation route guard.
///
/// Holds the identity provider and the tier updater; one instance serves
/// every navigation so the tier updater's debounce window is shared.
pub struct RouteGuard<P, T> {
    provider: Arc<P>,
    updater: TierUpdater<P, T>,
    identity_timeout: Duration,
}

impl<P, T> RouteGuard<P, T>
where
    P: IdentityProvider,
    T: TierService,
{
    pub fn new(provider: Arc<P>, service: T, config: &GuardConfig) -> Self {
        Self {
            updater: TierUpdater::new(provider.clone(), service, config.tier_update_debounce()),
            provider,
            identity_timeout: config.identity_timeout(),
        }
    }

    pub fn updater(&self) -> &TierUpdater<P, T> {
        &self.updater
    }

    /// State a host shows before `run` resolves.
    pub fn pending() -> GuardState {
        GuardState::Pending
    }

    pub async fn run(&self, intent: &NavigationIntent) -> GuardState {
        GuardState::Resolved(self.decide(intent).await)
    }

    /// Decide whether `intent` proceeds or is redirected.
    ///
    /// Never fails: identity, claims and tier-update errors are logged and
    /// degrade to the signed-out path or to the claims already in hand.
    #[tracing::instrument(
        skip(self, intent),
        fields(destination = %intent.destination_path, origin = %intent.origin_path)
    )]
    pub async fn decide(&self, intent: &NavigationIntent) -> RedirectDecision {
        match self.resolve_identity().await {
            None => rules::signed_out(intent),
            Some(credential) => {
                let claims = self.load_claims(&credential).await;
                rules::evaluate(&claims, intent)
            }
        }
    }

    /// Wait for the provider to report signed-in or signed-out.
    ///
    /// The subscription lives only for this call.
    async fn resolve_identity(&self) -> Option<Credential> {
        if let Some(credential) = self.provider.current_credential() {
            return Some(credential);
        }

        let mut states = self.provider.subscribe();
        let waited = tokio::time::timeout(
            self.identity_timeout,
            states.wait_for(CredentialState::is_resolved),
        )
        .await;

        let error = match waited {
            Ok(Ok(state)) => {
                let credential = state.credential().cloned();
                tracing::debug!(signed_in = credential.is_some(), "Identity resolved");
                return credential;
            }
            Ok(Err(_)) => GuardError::identity_unavailable("credential subscription closed"),
            Err(_) => GuardError::identity_unavailable(format!(
                "no credential state after {:?}",
                self.identity_timeout
            )),
        };
        tracing::warn!(error = %error, "Treating navigation as signed out");
        None
    }

    /// Read the credential's claims, promoting the tier first when the
    /// backend has not assigned one yet.
    async fn load_claims(&self, credential: &Credential) -> Claims {
        let mut claims = match self.provider.claims(credential, false).await {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, uid = %credential.uid, "Claims unavailable");
                Claims::default()
            }
        };

        if claims.is_incomplete() {
            if let Some(refreshed) = self.updater.request_tier_update(credential).await {
                claims.merge_tier(refreshed);
            }
        }
        claims
    }
}
