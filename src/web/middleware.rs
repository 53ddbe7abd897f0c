//! Builds contexts from requests.
//!
//! ```text
//! RequestAdapter
//!   ↓ extract_unauthed            ↓ extract_authed
//! Ctx<Unauthed> + FormData        Ctx<Authed> + FormData   (or Unauthenticated)
//! ```
//!
//! Extraction never authorizes anything. Per-customer decisions happen in
//! [`guard::require`](crate::guard::require).

use crate::context::Ctx;
use crate::error::Violation;
use crate::form::FormData;
use crate::state::{Authed, Unauthed};

use super::{ExtractFormData, ExtractMetadata};

/// Context for public pages plus the submitted form.
#[derive(Debug)]
pub struct UnauthenticatedExtraction {
    /// Context; the principal may be absent
    pub context: Ctx<Unauthed>,
    /// Submitted fields
    pub form: FormData,
}

/// Context for owner-scoped pages plus the submitted form.
#[derive(Debug)]
pub struct AuthenticatedExtraction {
    /// Context with a guaranteed principal
    pub context: Ctx<Authed>,
    /// Submitted fields
    pub form: FormData,
}

/// Extracts a context that may belong to a guest.
pub fn extract_unauthed<R>(request: &R) -> UnauthenticatedExtraction
where
    R: ExtractMetadata + ExtractFormData,
{
    UnauthenticatedExtraction {
        context: Ctx::new_unauthed(request.extract_metadata()),
        form: request.extract_form_data(),
    }
}

/// Extracts a context that must carry a principal.
///
/// # Errors
///
/// Returns an `Unauthenticated` violation for guests.
pub fn extract_authed<R>(request: &R) -> Result<AuthenticatedExtraction, Violation>
where
    R: ExtractMetadata + ExtractFormData,
{
    let context = Ctx::new_unauthed(request.extract_metadata()).authenticate()?;

    Ok(AuthenticatedExtraction {
        context,
        form: request.extract_form_data(),
    })
}
