//! Subscription-specific error types.
//!
//! Two failure shapes exist at this layer:
//!
//! - `InvalidArgument` - a required reference was absent; raised synchronously
//!   before any side effect, never partially applied.
//! - `Downstream` - the store, attribute service, or dispatcher failed; the
//!   original `DomainError` is carried unmodified so callers see exactly what
//!   the collaborator reported.
//!
//! Absence on the query paths (unknown id, empty listing) is a normal
//! `None`/empty-page outcome and never surfaces here.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the subscription service and the restock notifier.
#[derive(Debug, Clone)]
pub enum SubscriptionError {
    /// A required reference (subscription, customer, product) was absent.
    InvalidArgument {
        argument: String,
        reason: String,
    },

    /// A collaborator failed; carries the collaborator's error unmodified.
    Downstream(DomainError),
}

impl SubscriptionError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        SubscriptionError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            SubscriptionError::Downstream(err) => err.code,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::InvalidArgument { argument, reason } => {
                format!("Invalid argument '{}': {}", argument, reason)
            }
            SubscriptionError::Downstream(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        SubscriptionError::Downstream(err)
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::InvalidArgument { argument, reason } => {
                DomainError::invalid_argument(argument, reason)
            }
            SubscriptionError::Downstream(inner) => inner,
        }
    }
}
