use std::cell::RefCell;
use std::collections::VecDeque;

use super::AuditEvent;

/// `tracing` target of emitted audit events.
pub const AUDIT_TARGET: &str = "customer_audit";

/// Number of events [`AuditTrail::new`] keeps in memory.
pub const DEFAULT_CAPACITY: usize = 256;

/// Emits audit events through `tracing` and keeps the most recent ones in
/// memory.
///
/// The buffer is bounded: once `capacity` events are held, recording drops
/// the oldest. A capacity of zero keeps nothing and only logs.
///
/// Recording uses interior mutability so controllers can audit through a
/// shared reference.
#[derive(Debug)]
pub struct AuditTrail {
    events: RefCell<VecDeque<AuditEvent>>,
    capacity: usize,
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl AuditTrail {
    /// Creates an empty trail holding up to [`DEFAULT_CAPACITY`] events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trail holding up to `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: RefCell::new(VecDeque::new()),
            capacity,
        }
    }

    /// Returns how many events the trail keeps.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Logs `event` under [`AUDIT_TARGET`] and records it.
    pub fn emit(&self, event: AuditEvent) {
        tracing::info!(
            target: AUDIT_TARGET,
            request_id = %event.request_id(),
            principal = ?event.principal(),
            kind = %event.kind(),
            outcome = %event.outcome(),
            action = ?event.action(),
            customer = ?event.customer(),
            "audit event"
        );
        self.record(event);
    }

    /// Records `event` without logging it, evicting the oldest if full.
    pub fn record(&self, event: AuditEvent) {
        if self.capacity == 0 {
            return;
        }
        let mut events = self.events.borrow_mut();
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Returns a copy of the retained events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drops every recorded event.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
