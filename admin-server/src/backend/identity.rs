//! Identity provider gateway
//!
//! Session observation against the identity toolkit: each request's bearer
//! token is resolved with `accounts:lookup`. Tokens are stateless and
//! short-lived; the provider enforces expiry, so sign-out here has nothing
//! to revoke server-side.

use super::{AuthGateway, BackendError, BackendResult, StaffSession};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

const IDENTITY_HOST: &str = "https://identitytoolkit.googleapis.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Auth gateway backed by the managed identity provider
pub struct IdentityGateway {
    client: reqwest::Client,
    api_key: String,
}

impl IdentityGateway {
    pub fn new(api_key: impl Into<String>) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl AuthGateway for IdentityGateway {
    async fn verify_session(&self, token: &str) -> BackendResult<Option<StaffSession>> {
        let response = self
            .client
            .post(format!("{IDENTITY_HOST}/accounts:lookup"))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({"idToken": token}))
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();

        // The provider answers 400 for expired or invalid tokens; that is a
        // signed-out session, not a backend failure.
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Unavailable(format!("{status}: {body}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        let Some(account) = body
            .get("users")
            .and_then(Value::as_array)
            .and_then(|users| users.first())
        else {
            return Ok(None);
        };

        let uid = account
            .get("localId")
            .and_then(Value::as_str)
            .ok_or_else(|| BackendError::Malformed("account without localId".to_string()))?;

        Ok(Some(StaffSession {
            uid: uid.to_string(),
            email: account
                .get("email")
                .and_then(Value::as_str)
                .map(str::to_string),
            display_name: account
                .get("displayName")
                .and_then(Value::as_str)
                .map(str::to_string),
        }))
    }

    async fn sign_out(&self, _token: &str) -> BackendResult<()> {
        // ID tokens are stateless; expiry is enforced by the provider and the
        // client discards its refresh token on sign-out.
        Ok(())
    }
}
