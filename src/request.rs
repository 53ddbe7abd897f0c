use std::fmt;

/// Stable identifier of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrincipalId(pub u64);

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role held by a principal.
///
/// The set of roles is closed: code matching on `Role` is checked for
/// exhaustiveness, so adding a role forces every decision site to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Regular user; may only touch customers they own
    #[default]
    Standard,
    /// Administrator; may view, edit and delete any customer
    Administrator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Standard => write!(f, "standard"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

/// An authenticated user.
///
/// Immutable for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: PrincipalId,
    /// Display name
    pub name: String,
    /// Role flag used by the access guard
    pub role: Role,
}

impl Principal {
    /// Creates a principal with the [`Role::Standard`] role.
    pub fn standard(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: PrincipalId(id),
            name: name.into(),
            role: Role::Standard,
        }
    }

    /// Creates a principal with the [`Role::Administrator`] role.
    pub fn administrator(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: PrincipalId(id),
            name: name.into(),
            role: Role::Administrator,
        }
    }

    /// Returns `true` if this principal holds the administrator role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Administrator)
    }
}

/// HTTP method of the inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
}

impl Method {
    /// Returns `true` for methods that carry a form submission.
    pub fn submits_form(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// Metadata about an incoming request.
///
/// Contains the request identifier and optional principal (absent for guests).
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Authenticated principal, if any
    pub principal: Option<Principal>,
}
