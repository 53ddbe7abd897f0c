//! Type-state markers for context progression.
//!
//! The state of a [`Ctx`](crate::Ctx) decides what it knows about the
//! principal: an `Unauthed` context may or may not carry one, an `Authed`
//! context always does. The distinction is checked at compile time.

use crate::request::Principal;

/// State of a context whose principal has not been required yet.
///
/// `Ctx<Unauthed>` may still carry a principal; public pages such as the login
/// screen and the homepage use it to branch on guest vs. signed-in users.
#[derive(Debug, Clone)]
pub struct Unauthed {
    pub(crate) principal: Option<Principal>,
}

/// State of a context that is guaranteed to carry a principal.
///
/// Every owner-scoped customer action takes `Ctx<Authed>`, so guests are
/// rejected before the access guard is ever consulted.
///
/// Only the context can build this state:
///
/// ```compile_fail
/// use customer_guard::{Authed, Principal};
///
/// let forged = Authed { principal: Principal::administrator(1, "root") };
/// ```
#[derive(Debug, Clone)]
pub struct Authed {
    pub(crate) principal: Principal,
}
