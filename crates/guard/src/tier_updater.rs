use shared_types::{Claims, Credential, GuardError};
use std::sync::Arc;
use std::time::Duration;

use crate::callable::TierService;
use crate::debounce::Debouncer;
use crate::identity::IdentityProvider;

/// Promotes a user's tier claim through the backend, coalescing bursts.
///
/// One debounce window is shared by every caller of the same updater, so a
/// flurry of navigations produces a single backend call.
pub struct TierUpdater<P, T> {
    provider: Arc<P>,
    service: T,
    debouncer: Debouncer,
}

impl<P, T> TierUpdater<P, T>
where
    P: IdentityProvider,
    T: TierService,
{
    pub fn new(provider: Arc<P>, service: T, quiet_window: Duration) -> Self {
        Self {
            provider,
            service,
            debouncer: Debouncer::new(quiet_window),
        }
    }

    pub fn service(&self) -> &T {
        &self.service
    }

    /// Request a tier recomputation for `credential`.
    ///
    /// Returns the refreshed claims when this request is the one that ran.
    /// Coalesced requests and failures return `None`; callers keep the
    /// claims they already had.
    #[tracing::instrument(skip(self, credential), fields(uid = %credential.uid))]
    pub async fn request_tier_update(&self, credential: &Credential) -> Option<Claims> {
        match self.debouncer.run(|| self.execute(credential)).await {
            None => {
                tracing::debug!("Tier update superseded by a later request");
                None
            }
            Some(Ok(claims)) => Some(claims),
            Some(Err(e)) => {
                tracing::error!(error = %e, "Error updating account tier");
                None
            }
        }
    }

    async fn execute(&self, credential: &Credential) -> Result<Claims, GuardError> {
        self.service.update_account_tier(credential).await?;

        let claims = self
            .provider
            .claims(credential, true)
            .await
            .map_err(|e| GuardError::tier_update(format!("Token refresh failed: {}", e)))?;

        tracing::info!(
            account_type = %claims.account_type,
            account_tier = %claims.account_tier,
            "Account tier updated"
        );
        Ok(claims)
    }
}
