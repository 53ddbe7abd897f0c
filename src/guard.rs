//! Ownership-based access guard.
//!
//! One rule covers every per-customer action:
//!
//! - administrators are allowed unconditionally,
//! - otherwise the recorded owner is allowed,
//! - everybody else is denied.
//!
//! [`authorize`] is the pure decision. [`require`] wraps it for controllers:
//! an `Allow` becomes a [`Grant`] that the edit and delete workflows demand,
//! a `Deny` becomes an access-denied [`Error`].

use std::fmt;

use crate::capability::Grant;
use crate::context::Ctx;
use crate::customer::{Customer, Owned};
use crate::error::{Error, Violation};
use crate::request::Principal;
use crate::state::Authed;

/// An action on a single customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read the customer card
    View,
    /// Change the customer through the form workflow
    Edit,
    /// Remove the customer
    Delete,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 3] = [Action::View, Action::Edit, Action::Delete];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::View => write!(f, "view"),
            Action::Edit => write!(f, "edit"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Result of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The action may proceed
    Allow,
    /// The action must be aborted before any read-out or mutation
    Deny,
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decides whether `principal` may perform `action` on `resource`.
///
/// Pure function of its inputs; calling it twice yields the same decision.
///
/// # Examples
///
/// ```
/// use customer_guard::guard::{authorize, Action, Decision};
/// use customer_guard::{Customer, Principal, PrincipalId};
///
/// let owner = Principal::standard(1, "owner");
/// let stranger = Principal::standard(2, "stranger");
/// let admin = Principal::administrator(3, "admin");
/// let customer = Customer::new(PrincipalId(1));
///
/// assert_eq!(authorize(&owner, &customer, Action::Edit), Decision::Allow);
/// assert_eq!(authorize(&stranger, &customer, Action::Edit), Decision::Deny);
/// assert_eq!(authorize(&admin, &customer, Action::Delete), Decision::Allow);
/// ```
pub fn authorize<R>(principal: &Principal, resource: &R, action: Action) -> Decision
where
    R: Owned + ?Sized,
{
    // The same rule applies to every action.
    match action {
        Action::View | Action::Edit | Action::Delete => {
            if principal.is_admin() || resource.is_owned_by(principal.id) {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }
    }
}

/// Runs the guard for the context's principal and issues a [`Grant`].
///
/// # Errors
///
/// Returns an access-denied [`Error`] when the decision is `Deny`. No flash
/// message is posted for this case.
pub fn require(ctx: &Ctx<Authed>, customer: &Customer, action: Action) -> Result<Grant, Error> {
    let principal = ctx.principal();

    match authorize(principal, customer, action) {
        Decision::Allow => Ok(Grant::new(action, customer.id())),
        Decision::Deny => {
            tracing::warn!(
                request_id = %ctx.request_id(),
                principal = %principal.id,
                action = %action,
                customer = ?customer.id(),
                "access denied"
            );
            Err(Violation::access_denied(action, customer.id()).into())
        }
    }
}
