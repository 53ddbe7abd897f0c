//! Ownership-guarded customer workflows.
//!
//! This crate implements the request-level logic of a small CRM: customers
//! are owned by the user who created them, and every per-customer action
//! goes through one access rule.
//!
//! - **Access guard**: administrators may do anything, owners may act on
//!   their own customers, everybody else is denied ([`guard`]).
//! - **Grants**: an approval yields a [`Grant`] the edit and delete
//!   workflows demand, so the guard cannot be skipped.
//! - **Form workflow**: bind, validate, persist, flash, redirect; or
//!   re-render with field errors ([`workflow`]).
//! - **Guarded delete**: removal requires an anti-forgery token scoped to
//!   the customer ([`csrf`]).
//! - **Taint tracking**: submitted fields are [`Tainted`] until a
//!   [`Sanitizer`] verifies them.
//!
//! Storage, sessions and rendering are collaborators behind traits; the
//! in-memory implementations in [`store`] and [`SessionFlashBag`] make the
//! controllers in [`web`] usable end to end.
//!
//! # Examples
//!
//! ```
//! use customer_guard::web::{CustomerController, RequestAdapter};
//! use customer_guard::store::InMemoryCustomerStore;
//! use customer_guard::{AppConfig, Principal, PrincipalId, SessionFlashBag};
//!
//! let config = AppConfig::from_toml_str(r#"locale = "en""#).unwrap();
//! let mut customers =
//!     CustomerController::from_config(&config, InMemoryCustomerStore::new(), SessionFlashBag::new())
//!         .unwrap();
//! let id = customers.store_mut().seed("Acme Ltd", PrincipalId(1));
//!
//! let mut request = RequestAdapter::new("req-42".to_string());
//! request.set_principal(Some(Principal::standard(2, "mallory")));
//!
//! let err = customers.show(&request, id).unwrap_err();
//! assert!(err.is_access_denied());
//! assert_eq!(err.status_code(), 403);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod capability;
pub mod config;
mod context;
pub mod csrf;
mod customer;
mod error;
pub mod flash;
pub mod form;
pub mod guard;
mod logging;
mod outcome;
mod request;
mod sanitizer;
mod secret;
mod state;
pub mod store;
mod tainted;
mod verified;
pub mod web;
pub mod workflow;

pub use capability::Grant;
pub use config::{AppConfig, ConfigError, Locale, Messages, Settings};
pub use context::Ctx;
pub use csrf::{CsrfToken, CsrfTokenManager, HmacCsrfTokenManager};
pub use customer::{Customer, CustomerId, Owned, ServiceRequest};
pub use error::{Error, Violation, ViolationKind};
pub use flash::{Flash, FlashBag, FlashCategory, SessionFlashBag};
pub use guard::{authorize, Action, Decision};
pub use logging::RequestLog;
pub use outcome::{Outcome, Redirect, View};
pub use request::{Method, Principal, PrincipalId, RequestMeta, Role};
pub use sanitizer::{SanitizationError, SanitizationErrorKind, Sanitizer, StringSanitizer};
pub use secret::Secret;
pub use state::{Authed, Unauthed};
pub use store::StoreError;
pub use tainted::Tainted;
pub use verified::Verified;
