//! Failure taxonomy for remote calls and its user-facing rendering.

use std::fmt;

use shared::domain::ResourceKind;
use thiserror::Error;

/// A failed call against the admin API, as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// No response was received.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A response carried a structured, human-readable rejection.
    #[error("{detail}")]
    Validation { status: u16, detail: String },
    #[error("record not found")]
    NotFound { detail: Option<String> },
    #[error("access denied")]
    Forbidden { detail: Option<String> },
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("session token is not available yet")]
    TokenPending,
    #[error("not signed in")]
    Unauthenticated,
}

impl ApiFailure {
    /// The server-provided message, shown to the operator verbatim.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiFailure::Validation { detail, .. } => Some(detail.as_str()),
            ApiFailure::NotFound { detail } | ApiFailure::Forbidden { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    NotFound,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    LoadList,
    LoadStats,
    Create,
    Update,
    Delete,
}

impl UiErrorContext {
    fn fallback_message(self, resource: ResourceKind) -> String {
        match self {
            UiErrorContext::LoadList => {
                format!("Failed to load {resource}. Please try again.")
            }
            UiErrorContext::LoadStats => {
                format!("Failed to load {} statistics. Please try again.", resource.singular())
            }
            UiErrorContext::Create => {
                format!("Failed to create {}. Please try again.", resource.singular())
            }
            UiErrorContext::Update => {
                format!("Failed to update {}. Please try again.", resource.singular())
            }
            UiErrorContext::Delete => {
                format!("Failed to delete {}. Please try again.", resource.singular())
            }
        }
    }
}

/// An error as the operator sees it: a single message plus enough context to
/// decide how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    resource: ResourceKind,
    message: String,
}

impl UiError {
    pub fn from_failure(
        context: UiErrorContext,
        resource: ResourceKind,
        failure: &ApiFailure,
    ) -> Self {
        let category = match failure {
            ApiFailure::Transport(_) => UiErrorCategory::Transport,
            ApiFailure::Validation { .. } => UiErrorCategory::Validation,
            ApiFailure::NotFound { .. } => UiErrorCategory::NotFound,
            ApiFailure::Forbidden { .. }
            | ApiFailure::TokenPending
            | ApiFailure::Unauthenticated => UiErrorCategory::Auth,
            ApiFailure::Status { .. } | ApiFailure::Decode(_) => UiErrorCategory::Unknown,
        };
        let message = failure
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| context.fallback_message(resource));

        Self {
            category,
            context,
            resource,
            message,
        }
    }

    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UiError {}
