//! Framework boundary and controllers.
//!
//! The host framework builds a [`RequestAdapter`] per request (request id,
//! resolved principal, method, submitted fields) and calls a controller
//! action. Actions return an [`Outcome`](crate::Outcome) to render or
//! redirect, or an [`Error`](crate::Error) whose
//! [`status_code`](crate::Error::status_code) the framework answers with.
//!
//! Submitted fields become [`Tainted`](crate::Tainted) at extraction; no
//! controller reads them raw.
//!
//! # Example Flow
//!
//! ```
//! use customer_guard::web::{CustomerController, RequestAdapter};
//! use customer_guard::{AppConfig, Method, Principal, SessionFlashBag};
//! use customer_guard::store::InMemoryCustomerStore;
//!
//! let config = AppConfig::from_toml_str("").unwrap();
//! let mut customers = CustomerController::from_config(
//!     &config,
//!     InMemoryCustomerStore::new(),
//!     SessionFlashBag::new(),
//! )
//! .unwrap();
//!
//! let mut request = RequestAdapter::new("req-1".to_string());
//! request.set_principal(Some(Principal::standard(1, "alice")));
//! request.set_method(Method::Post);
//! request.add_form_field("name", "Acme Ltd");
//!
//! let outcome = customers.add(&request).unwrap();
//! assert_eq!(outcome.location(), Some("/customer"));
//! ```

mod adapter;
mod customer;
mod extract;
mod middleware;
mod security;
mod site;

pub use adapter::{RequestAdapter, CSRF_TOKEN_FIELD};
pub use customer::CustomerController;
pub use extract::{ExtractFormData, ExtractMetadata};
pub use middleware::{
    extract_authed, extract_unauthed, AuthenticatedExtraction, UnauthenticatedExtraction,
};
pub use security::{AuthenticationState, LastAuthentication, SecurityController};
pub use site::SiteController;
