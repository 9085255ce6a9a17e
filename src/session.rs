//! Process session state and the authentication guard.
//!
//! The session starts unauthenticated and only a sign-in attempt changes it.
//! There is no sign-out: once authenticated it stays so until the process exits,
//! unless a later sign-in attempt fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content};

use crate::identity::{Identity, IdentityError, IdentityProvider};

/// Text returned by protected tools while unauthenticated
pub const AUTH_REQUIRED: &str =
    "Authentication required. Please authenticate first using the 'authenticate' tool.";

/// Outcome of a sign-in attempt
#[derive(Debug)]
pub enum SignIn {
    Accepted(Identity),
    Rejected(String),
    Failed(IdentityError),
}

impl SignIn {
    /// Whether the backend accepted the credentials
    pub fn is_accepted(&self) -> bool {
        matches!(self, SignIn::Accepted(_))
    }
}

/// Returned by [`Session::guard`] when a protected tool runs unauthenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDenied;

impl From<AuthDenied> for CallToolResult {
    fn from(_: AuthDenied) -> Self {
        CallToolResult::success(vec![Content::text(AUTH_REQUIRED)])
    }
}

/// Sign-in state of the process, shared by every tool handler
pub struct Session {
    authenticated: AtomicBool,
    identity: Arc<dyn IdentityProvider>,
}

impl Session {
    /// Creates an unauthenticated session backed by `identity`
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            authenticated: AtomicBool::new(false),
            identity,
        }
    }

    /// Reads the session flag without side effects
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// Signed-in identity reported by the backend
    pub fn current_identity(&self) -> Option<Identity> {
        self.identity.current_identity()
    }

    /// Attempts to sign in; the session flag records the outcome
    pub async fn sign_in(&self, email: &str, password: &str) -> SignIn {
        let outcome = match self.identity.verify_credentials(email, password).await {
            Ok(identity) => {
                tracing::info!("User authenticated: {}", identity.email);
                SignIn::Accepted(identity)
            }
            Err(IdentityError::Rejected(reason)) => {
                tracing::warn!("Authentication rejected for {}: {}", email, reason);
                SignIn::Rejected(reason)
            }
            Err(e) => {
                tracing::error!("Authentication error: {}", e);
                SignIn::Failed(e)
            }
        };
        self.authenticated
            .store(outcome.is_accepted(), Ordering::SeqCst);
        outcome
    }

    /// Signs in and returns whether the session is now authenticated
    pub async fn authenticate(&self, email: &str, password: &str) -> bool {
        self.sign_in(email, password).await.is_accepted()
    }

    /// Gate for protected tools; must be the first thing they check
    pub fn guard(&self) -> Result<(), AuthDenied> {
        if self.is_authenticated() {
            Ok(())
        } else {
            tracing::warn!("Rejected unauthenticated tool call");
            Err(AuthDenied)
        }
    }
}
