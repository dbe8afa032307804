//! Explicit session context handed to every controller and transport.

use std::{fmt, sync::Arc};

use tokio::sync::RwLock;

use crate::error::ApiFailure;

/// Where the bearer token stands. `Pending` (sign-in still resolving) and
/// `Anonymous` (resolved, nobody signed in) are different conditions and are
/// never collapsed into each other.
#[derive(Clone, PartialEq, Eq)]
pub enum TokenState {
    Pending,
    Anonymous,
    Bearer(String),
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenState::Pending => f.write_str("Pending"),
            TokenState::Anonymous => f.write_str("Anonymous"),
            TokenState::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

impl TokenState {
    fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            TokenState::Anonymous
        } else {
            TokenState::Bearer(token)
        }
    }
}

/// Shared handle to the operator's session. Clones observe the same state.
#[derive(Clone, Debug)]
pub struct Session {
    state: Arc<RwLock<TokenState>>,
}

impl Session {
    pub fn pending() -> Self {
        Self::from_state(TokenState::Pending)
    }

    pub fn anonymous() -> Self {
        Self::from_state(TokenState::Anonymous)
    }

    /// A blank token is treated as no token at all.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::from_state(TokenState::from_token(token))
    }

    fn from_state(state: TokenState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn token_state(&self) -> TokenState {
        self.state.read().await.clone()
    }

    pub async fn is_pending(&self) -> bool {
        matches!(*self.state.read().await, TokenState::Pending)
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.state.write().await = TokenState::from_token(token);
    }

    pub async fn sign_out(&self) {
        *self.state.write().await = TokenState::Anonymous;
    }

    /// The bearer token to attach to a request, if any.
    pub async fn authorization(&self) -> Result<Option<String>, ApiFailure> {
        match &*self.state.read().await {
            TokenState::Pending => Err(ApiFailure::TokenPending),
            TokenState::Anonymous => Ok(None),
            TokenState::Bearer(token) => Ok(Some(token.clone())),
        }
    }

    /// Like [`Session::authorization`], but an absent token is a failure.
    pub async fn require_token(&self) -> Result<String, ApiFailure> {
        self.authorization()
            .await?
            .ok_or(ApiFailure::Unauthenticated)
    }
}
