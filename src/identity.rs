//! Identity backend adapter.
//!
//! Email/password verification against the Firebase Identity Toolkit REST API,
//! behind the [`IdentityProvider`] trait so the session can be driven by any backend.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A signed-in account as reported by the identity backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The backend declined the credentials
    #[error("credentials rejected: {0}")]
    Rejected(String),
    /// No API key is configured for the backend
    #[error("identity backend is not configured (FIREBASE_API_KEY is unset)")]
    NotConfigured,
    /// The backend could not be reached or answered unexpectedly
    #[error("identity backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies an email/password pair
    async fn verify_credentials(&self, email: &str, password: &str)
        -> Result<Identity, IdentityError>;

    /// The identity signed in through this provider, if any
    fn current_identity(&self) -> Option<Identity>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase email/password sign-in over REST
pub struct FirebaseIdentity {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    current: Mutex<Option<Identity>>,
}

impl FirebaseIdentity {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            current: Mutex::new(None),
        })
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = identity;
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let api_key = self.api_key.as_deref().ok_or(IdentityError::NotConfigured)?;
        let url = format!("{}/accounts:signInWithPassword", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| IdentityError::Backend(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<SignInResponse>()
                .await
                .map_err(|e| IdentityError::Backend(format!("malformed sign-in response: {}", e)))?;
            return Ok(Identity {
                uid: body.local_id,
                email: body.email.unwrap_or_else(|| email.to_string()),
            });
        }

        // Firebase reports bad credentials as 400 with an error code in `error.message`
        if status == StatusCode::BAD_REQUEST {
            if let Ok(envelope) = response.json::<ErrorEnvelope>().await {
                return Err(IdentityError::Rejected(envelope.error.message));
            }
        }
        Err(IdentityError::Backend(format!(
            "sign-in request returned status {}",
            status
        )))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityError> {
        let result = self.sign_in(email, password).await;
        self.set_current(result.as_ref().ok().cloned());
        result
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
