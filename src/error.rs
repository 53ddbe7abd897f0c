use std::fmt;

use crate::config::ConfigError;
use crate::customer::CustomerId;
use crate::guard::Action;
use crate::store::StoreError;

/// Errors surfaced by controller actions.
///
/// Validation failures and rejected CSRF tokens are recovered locally and
/// never appear here: the first renders the form again, the second ends in an
/// error flash and a redirect.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A policy violation occurred (guard denial or missing principal)
    #[error("Policy violation: {0}")]
    Violation(#[from] Violation),
    /// The addressed customer does not exist
    #[error("Customer {0} not found")]
    NotFound(CustomerId),
    /// The persistence collaborator failed; fatal for the request
    #[error("Persistence failure: {0}")]
    Store(#[from] StoreError),
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` if the guard rejected the action.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Error::Violation(Violation {
                kind: ViolationKind::AccessDenied { .. },
                ..
            })
        )
    }

    /// Returns the HTTP status the framework boundary should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Violation(v) => match v.kind {
                ViolationKind::Unauthenticated => 401,
                ViolationKind::AccessDenied { .. } => 403,
            },
            Error::NotFound(_) => 404,
            Error::Store(_) | Error::Config(_) => 500,
        }
    }
}

/// A policy violation with details about what failed.
#[derive(Debug, PartialEq, Eq)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an access-denied violation for `action` on `customer`.
    pub fn access_denied(action: Action, customer: Option<CustomerId>) -> Self {
        Self::new(
            ViolationKind::AccessDenied { action, customer },
            "Access denied",
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of policy violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Authentication is required but missing
    Unauthenticated,
    /// The principal neither owns the customer nor is an administrator
    AccessDenied {
        /// The action that was refused
        action: Action,
        /// The customer it was refused on
        customer: Option<CustomerId>,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Unauthenticated => write!(f, "Unauthenticated"),
            ViolationKind::AccessDenied {
                action,
                customer: Some(id),
            } => write!(f, "Access denied for '{}' on customer {}", action, id),
            ViolationKind::AccessDenied {
                action,
                customer: None,
            } => write!(f, "Access denied for '{}'", action),
        }
    }
}
