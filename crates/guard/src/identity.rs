use serde::Deserialize;
use shared_types::{Claims, Credential, CredentialState, GuardError};
use std::future::Future;
use tokio::sync::watch;

/// The three identity-provider operations the guard relies on.
pub trait IdentityProvider {
    /// The signed-in credential, if the provider already knows it.
    fn current_credential(&self) -> Option<Credential>;

    /// Subscribe to credential-state changes. The receiver starts at the
    /// provider's current state.
    fn subscribe(&self) -> watch::Receiver<CredentialState>;

    /// Read the claims carried by `credential`. `force_refresh` asks the
    /// provider to mint a fresh token so newly written claims show up.
    fn claims(
        &self,
        credential: &Credential,
        force_refresh: bool,
    ) -> impl Future<Output = Result<Claims, GuardError>> + Send;
}

/// Token result returned by the provider's claims endpoint.
#[derive(Debug, Deserialize)]
struct IdTokenResult {
    /// Present when a refresh minted a new token.
    #[serde(default)]
    token: Option<String>,
    claims: Claims,
}

/// Identity provider reached over HTTP.
///
/// Sign-in and sign-out are driven by the host (login form, session
/// restore) through [`HttpIdentityProvider::set_credential`] and
/// [`HttpIdentityProvider::sign_out`]; claims are fetched from
/// `GET {base_url}/claims` with the credential as bearer token.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    state: watch::Sender<CredentialState>,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(CredentialState::Unresolved);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            state,
        }
    }

    pub fn set_credential(&self, credential: Credential) {
        tracing::debug!(uid = %credential.uid, "Credential state: signed in");
        self.state.send_replace(CredentialState::SignedIn(credential));
    }

    pub fn sign_out(&self) {
        tracing::debug!("Credential state: signed out");
        self.state.send_replace(CredentialState::SignedOut);
    }

    fn claims_url(&self, force_refresh: bool) -> String {
        if force_refresh {
            format!("{}/claims?forceRefresh=true", self.base_url)
        } else {
            format!("{}/claims", self.base_url)
        }
    }

    /// Swap in a refreshed token if it belongs to the still-signed-in user.
    fn store_refreshed_token(&self, uid: &str, token: String) {
        self.state.send_if_modified(|state| match state {
            CredentialState::SignedIn(current) if current.uid == uid => {
                current.id_token = token;
                true
            }
            _ => false,
        });
    }
}

impl IdentityProvider for HttpIdentityProvider {
    fn current_credential(&self) -> Option<Credential> {
        self.state.borrow().credential().cloned()
    }

    fn subscribe(&self) -> watch::Receiver<CredentialState> {
        self.state.subscribe()
    }

    #[tracing::instrument(skip(self, credential), fields(uid = %credential.uid))]
    async fn claims(
        &self,
        credential: &Credential,
        force_refresh: bool,
    ) -> Result<Claims, GuardError> {
        let response = self
            .client
            .get(self.claims_url(force_refresh))
            .bearer_auth(&credential.id_token)
            .send()
            .await
            .map_err(|e| GuardError::transport(format!("Claims request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GuardError::claims_unavailable(format!(
                "Identity provider error ({}): {}",
                status, body
            )));
        }

        let result: IdTokenResult = response
            .json()
            .await
            .map_err(|e| GuardError::transport(format!("Invalid claims body: {}", e)))?;

        if let Some(token) = result.token {
            self.store_refreshed_token(&credential.uid, token);
        }
        Ok(result.claims)
    }
}
