use std::fmt;

use crate::customer::CustomerId;
use crate::guard::Action;
use crate::request::PrincipalId;

/// What an audit event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEventKind {
    /// The access guard ruled on an action
    Authorization,
    /// A customer was created
    CustomerCreated,
    /// A customer was updated
    CustomerUpdated,
    /// A customer was deleted
    CustomerDeleted,
    /// A delete was refused because of its anti-forgery token
    TokenRejected,
}

impl fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEventKind::Authorization => write!(f, "authorization"),
            AuditEventKind::CustomerCreated => write!(f, "customer_created"),
            AuditEventKind::CustomerUpdated => write!(f, "customer_updated"),
            AuditEventKind::CustomerDeleted => write!(f, "customer_deleted"),
            AuditEventKind::TokenRejected => write!(f, "token_rejected"),
        }
    }
}

/// Outcome recorded with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Completed
    Success,
    /// Refused by the guard or the token check
    Denied,
    /// Failed in a collaborator
    Error,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOutcome::Success => write!(f, "success"),
            AuditOutcome::Denied => write!(f, "denied"),
            AuditOutcome::Error => write!(f, "error"),
        }
    }
}

/// A structured audit record.
///
/// # Examples
///
/// ```
/// use customer_guard::audit::{AuditEvent, AuditEventKind, AuditOutcome};
/// use customer_guard::guard::Action;
/// use customer_guard::{CustomerId, PrincipalId};
///
/// let event = AuditEvent::new("req-1", Some(PrincipalId(2)), AuditEventKind::Authorization, AuditOutcome::Denied)
///     .with_action(Action::Delete)
///     .with_customer(CustomerId(5));
///
/// assert_eq!(
///     event.to_string(),
///     "AuditEvent[kind=authorization, outcome=denied, request_id=req-1, principal=2, action=delete, customer=5]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    request_id: String,
    principal: Option<PrincipalId>,
    kind: AuditEventKind,
    outcome: AuditOutcome,
    action: Option<Action>,
    customer: Option<CustomerId>,
}

impl AuditEvent {
    /// Creates an event with the required fields.
    pub fn new(
        request_id: impl Into<String>,
        principal: Option<PrincipalId>,
        kind: AuditEventKind,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            principal,
            kind,
            outcome,
            action: None,
            customer: None,
        }
    }

    /// Sets the action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the customer, if known.
    pub fn with_customer(mut self, customer: impl Into<Option<CustomerId>>) -> Self {
        self.customer = customer.into();
        self
    }

    /// Returns the request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the acting principal.
    pub fn principal(&self) -> Option<PrincipalId> {
        self.principal
    }

    /// Returns the event kind.
    pub fn kind(&self) -> AuditEventKind {
        self.kind
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> AuditOutcome {
        self.outcome
    }

    /// Returns the action, if any.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Returns the customer, if any.
    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditEvent[kind={}, outcome={}, request_id={}",
            self.kind, self.outcome, self.request_id
        )?;
        match self.principal {
            Some(principal) => write!(f, ", principal={}", principal)?,
            None => write!(f, ", principal=<none>")?,
        }
        if let Some(action) = self.action {
            write!(f, ", action={}", action)?;
        }
        if let Some(customer) = self.customer {
            write!(f, ", customer={}", customer)?;
        }
        write!(f, "]")
    }
}
