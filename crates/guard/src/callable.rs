use serde::{Deserialize, Serialize};
use shared_types::{Credential, GuardError};
use std::future::Future;

/// Name of the callable function that recomputes a user's tier and type.
pub const UPDATE_ACCOUNT_TIER: &str = "updateAccountTier";

/// Backend procedure that recomputes and persists a user's account tier.
pub trait TierService {
    /// Ask the backend to recompute `credential`'s tier. Completion means the
    /// new claims are written; the caller refreshes its token to see them.
    fn update_account_tier(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<(), GuardError>> + Send;
}

#[derive(Debug, Serialize)]
struct CallableRequest<'a> {
    data: UpdateTierData<'a>,
}

#[derive(Debug, Serialize)]
struct UpdateTierData<'a> {
    #[serde(rename = "userUid")]
    user_uid: &'a str,
}

#[derive(Debug, Deserialize)]
struct CallableResponse {
    #[serde(default)]
    error: Option<CallableError>,
}

#[derive(Debug, Deserialize)]
struct CallableError {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Interpret a callable-function response body.
///
/// A body with `error` is a failure even on a 2xx status. Any other JSON
/// object on a 2xx status is success; the `result` payload is not needed
/// because the caller re-reads claims from a refreshed token.
fn interpret_body(status: u16, body: &str) -> Result<(), GuardError> {
    let parsed: Option<CallableResponse> = serde_json::from_str(body).ok();
    match parsed {
        Some(CallableResponse { error: Some(err) }) => Err(GuardError::tier_update(format!(
            "{} failed ({}): {} {}",
            UPDATE_ACCOUNT_TIER, status, err.status, err.message
        ))),
        Some(_) if (200..300).contains(&status) => Ok(()),
        _ if (200..300).contains(&status) => Err(GuardError::tier_update(format!(
            "{} returned a malformed body",
            UPDATE_ACCOUNT_TIER
        ))),
        _ => Err(GuardError::tier_update(format!(
            "{} failed ({}): {}",
            UPDATE_ACCOUNT_TIER, status, body
        ))),
    }
}

/// [`TierService`] backed by an HTTPS callable function.
///
/// Posts `{"data":{"userUid":...}}` to `{base_url}/updateAccountTier` with
/// the user's id token as bearer.
pub struct CallableTierService {
    client: reqwest::Client,
    base_url: String,
}

impl CallableTierService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, UPDATE_ACCOUNT_TIER)
    }
}

impl TierService for CallableTierService {
    #[tracing::instrument(skip(self, credential), fields(uid = %credential.uid))]
    async fn update_account_tier(&self, credential: &Credential) -> Result<(), GuardError> {
        let request = CallableRequest {
            data: UpdateTierData {
                user_uid: &credential.uid,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&credential.id_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| GuardError::transport(format!("Callable request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        interpret_body(status, &body)
    }
}
