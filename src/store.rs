//! Persistence collaborators.
//!
//! Controllers reach storage only through [`CustomerStore`] and
//! [`ServiceRequestStore`]. The in-memory implementations here back the
//! integration tests and small deployments.

mod customer;
mod service_request;

pub use customer::{CustomerStore, InMemoryCustomerStore};
pub use service_request::{InMemoryServiceRequestStore, ServiceRequestStore};

use crate::customer::CustomerId;

/// Failures reported by a store.
///
/// Every variant is fatal for the current request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The stored row changed since it was loaded
    #[error("customer {customer} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        /// Customer whose version did not match
        customer: CustomerId,
        /// Version the staged change was based on
        expected: u64,
        /// Version currently stored
        found: u64,
    },
    /// A staged update or removal targets a row that no longer exists
    #[error("customer {0} not found")]
    NotFound(CustomerId),
    /// The backing store cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The staged operation is malformed
    #[error("invalid operation: {0}")]
    Invalid(String),
}
