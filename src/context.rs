use crate::error::{Violation, ViolationKind};
use crate::logging::RequestLog;
use crate::request::{Principal, RequestMeta};
use crate::state::{Authed, Unauthed};

/// Execution context for one inbound request.
///
/// `Ctx<S>` is generic over its authentication state:
/// - `Ctx<Unauthed>`: principal optional (guest or signed-in)
/// - `Ctx<Authed>`: principal guaranteed present
///
/// # Type-State Progression
///
/// ```text
/// Ctx<Unauthed> --authenticate--> Ctx<Authed>
/// ```
///
/// Owner-scoped customer actions only accept `Ctx<Authed>`. The principal is
/// passed explicitly through this value; nothing is read from ambient state.
///
/// # Construction
///
/// `Ctx` cannot be constructed by user code. Obtain one from the web
/// extraction functions in [`crate::web`].
///
/// ```compile_fail
/// use customer_guard::{Ctx, RequestMeta};
///
/// let ctx = Ctx::new_unauthed(RequestMeta { request_id: "forged".into(), principal: None });
/// ```
///
/// # Examples
///
/// ```
/// use customer_guard::web::{extract_authed, RequestAdapter};
/// use customer_guard::Principal;
///
/// let mut adapter = RequestAdapter::new("req-123".to_string());
/// adapter.set_principal(Some(Principal::standard(1, "alice")));
///
/// let extraction = extract_authed(&adapter).expect("principal present");
/// assert_eq!(extraction.context.principal().name, "alice");
/// assert!(!extraction.context.is_admin());
/// ```
#[derive(Debug, Clone)]
pub struct Ctx<S = Authed> {
    request_id: String,
    state: S,
}

// ============================================================================
// Shared methods (available on all states)
// ============================================================================

impl<S> Ctx<S> {
    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns a logger that stamps every event with this request's ID.
    pub fn log(&self) -> RequestLog<'_> {
        RequestLog::new(&self.request_id)
    }
}

// ============================================================================
// Ctx<Unauthed> - principal not yet required
// ============================================================================

impl Ctx<Unauthed> {
    /// Creates a context from extracted request metadata.
    ///
    /// This is `pub(crate)` so only the web extraction layer can create it.
    pub(crate) fn new_unauthed(meta: RequestMeta) -> Self {
        Self {
            request_id: meta.request_id,
            state: Unauthed {
                principal: meta.principal,
            },
        }
    }

    /// Returns the principal if the request is signed in.
    pub fn principal(&self) -> Option<&Principal> {
        self.state.principal.as_ref()
    }

    /// Returns `true` if a principal is present and holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.principal().is_some_and(Principal::is_admin)
    }

    /// Requires a principal, progressing to `Ctx<Authed>`.
    ///
    /// # Errors
    ///
    /// Returns a [`ViolationKind::Unauthenticated`] violation for guests.
    pub fn authenticate(self) -> Result<Ctx<Authed>, Violation> {
        match self.state.principal {
            Some(principal) => Ok(Ctx {
                request_id: self.request_id,
                state: Authed { principal },
            }),
            None => Err(Violation::new(
                ViolationKind::Unauthenticated,
                "Authentication required: principal not provided",
            )),
        }
    }
}

// ============================================================================
// Ctx<Authed> - principal present
// ============================================================================

impl Ctx<Authed> {
    /// Returns the authenticated principal.
    pub fn principal(&self) -> &Principal {
        &self.state.principal
    }

    /// Returns `true` if the principal holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.state.principal.is_admin()
    }
}
