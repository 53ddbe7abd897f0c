use crate::customer::CustomerId;
use crate::guard::Action;

/// Proof that the access guard allowed an action on a customer.
///
/// A `Grant` is the only way into the edit and delete workflows. It cannot
/// be constructed outside this crate; the sole constructor is called by
/// [`guard::require`](crate::guard::require) after an `Allow` decision.
///
/// # Examples
///
/// ```compile_fail
/// # use customer_guard::{Grant, Action};
/// // Grants cannot be forged:
/// let grant = Grant { action: Action::Delete, customer: None, _private: () };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    action: Action,
    customer: Option<CustomerId>,
    // Private field prevents construction outside the crate
    _private: (),
}

impl Grant {
    /// Creates a new Grant.
    ///
    /// This is `pub(crate)` so only the guard can issue grants.
    pub(crate) fn new(action: Action, customer: Option<CustomerId>) -> Self {
        Self {
            action,
            customer,
            _private: (),
        }
    }

    /// Returns the action this grant allows.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the customer this grant was issued for.
    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }

    /// Returns `true` if this grant allows `action` on `customer`.
    pub fn covers(&self, action: Action, customer: Option<CustomerId>) -> bool {
        self.action == action && self.customer == customer
    }
}
