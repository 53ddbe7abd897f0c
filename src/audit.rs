//! Audit trail for access decisions and customer mutations.
//!
//! Events carry identifiers only: request id, principal id, action and
//! customer id. Form values and tokens are never recorded.

mod event;
mod trail;

pub use event::{AuditEvent, AuditEventKind, AuditOutcome};
pub use trail::{AuditTrail, AUDIT_TARGET, DEFAULT_CAPACITY};
