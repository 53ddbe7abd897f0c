//! Customer records and the service requests raised against them.

use std::fmt;

use crate::request::PrincipalId;

/// Identifier assigned to a customer by the store on first commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resource with a single recorded owner.
///
/// Implemented by every type the access guard can rule on.
pub trait Owned {
    /// Returns the principal recorded as owner, if any.
    fn owner(&self) -> Option<PrincipalId>;

    /// Returns `true` if `principal` is the recorded owner.
    fn is_owned_by(&self, principal: PrincipalId) -> bool {
        self.owner() == Some(principal)
    }
}

/// A customer record.
///
/// The owner is fixed at construction. There is no setter for it, so neither
/// the edit workflow nor form binding can reassign ownership.
///
/// # Examples
///
/// ```
/// use customer_guard::{Customer, Owned, PrincipalId};
///
/// let mut customer = Customer::new(PrincipalId(1));
/// customer.set_name("Acme Ltd");
///
/// assert!(customer.is_new());
/// assert!(customer.is_owned_by(PrincipalId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: Option<CustomerId>,
    name: String,
    owner: Option<PrincipalId>,
    version: u64,
}

impl Customer {
    /// Creates an unsaved customer owned by `owner`.
    pub fn new(owner: PrincipalId) -> Self {
        Self {
            id: None,
            name: String::new(),
            owner: Some(owner),
            version: 0,
        }
    }

    /// Rebuilds a customer from stored state.
    ///
    /// Store implementations use this when loading rows. `owner` may be
    /// `None` only for legacy rows whose creator was removed.
    pub fn hydrate(
        id: CustomerId,
        name: impl Into<String>,
        owner: Option<PrincipalId>,
        version: u64,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            owner,
            version,
        }
    }

    /// Returns the identifier, or `None` if the customer was never committed.
    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the optimistic-lock version this copy was loaded with.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` if the customer has not been committed yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl Owned for Customer {
    fn owner(&self) -> Option<PrincipalId> {
        self.owner
    }
}

/// A service request raised for a customer, listed on the homepage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Request identifier
    pub id: u64,
    /// Short description
    pub title: String,
    /// Customer the request belongs to
    pub customer: CustomerId,
    /// Display name of that customer
    pub customer_name: String,
    /// Owner of that customer
    pub owner: PrincipalId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_customer_has_owner_and_no_id() {
        let customer = Customer::new(PrincipalId(3));

        assert!(customer.is_new());
        assert_eq!(customer.id(), None);
        assert_eq!(customer.owner(), Some(PrincipalId(3)));
        assert_eq!(customer.version(), 0);
        assert_eq!(customer.name(), "");
    }

    #[test]
    fn hydrated_customer_keeps_stored_state() {
        let customer = Customer::hydrate(CustomerId(9), "Test Customer", Some(PrincipalId(1)), 4);

        assert!(!customer.is_new());
        assert_eq!(customer.id(), Some(CustomerId(9)));
        assert_eq!(customer.name(), "Test Customer");
        assert_eq!(customer.version(), 4);
    }

    #[test]
    fn renaming_does_not_touch_owner() {
        let mut customer = Customer::hydrate(CustomerId(1), "Old", Some(PrincipalId(1)), 1);
        customer.set_name("New");

        assert_eq!(customer.name(), "New");
        assert!(customer.is_owned_by(PrincipalId(1)));
    }

    #[test]
    fn ownerless_customer_is_owned_by_nobody() {
        let customer = Customer::hydrate(CustomerId(2), "Orphan", None, 1);
        assert!(!customer.is_owned_by(PrincipalId(1)));
    }
}
