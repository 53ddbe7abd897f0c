//! What a controller action asks the framework boundary to do.

use crate::customer::{Customer, CustomerId, ServiceRequest};
use crate::form::FormView;

/// Instruction to redirect the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target path
    pub location: String,
}

impl Redirect {
    /// Creates a redirect to `location`.
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// A page to render, with its template context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Customer listing
    CustomerIndex {
        /// Page title
        title: String,
        /// Customers to list, newest first
        customers: Vec<Customer>,
        /// Whether the viewer is an administrator
        is_admin: bool,
    },
    /// Single customer card
    CustomerCard {
        /// Page title
        title: String,
        /// The customer shown
        customer: Customer,
        /// Whether the viewer is an administrator
        is_admin: bool,
    },
    /// Create or edit form
    CustomerForm {
        /// Page title
        title: String,
        /// Form render model, including field errors
        form: FormView,
        /// The customer being edited, `None` when creating
        customer: Option<CustomerId>,
        /// Whether the viewer is an administrator
        is_admin: bool,
    },
    /// Login screen
    Login {
        /// Page title
        title: String,
        /// Username of the last attempt
        last_username: String,
        /// Error of the last attempt
        error: Option<String>,
    },
    /// Homepage
    Home {
        /// Page title
        title: String,
        /// Service requests visible to the viewer
        requests: Vec<ServiceRequest>,
        /// Whether the viewer is an administrator
        is_admin: bool,
    },
}

impl View {
    /// Returns the template path for this view.
    pub fn template(&self) -> &'static str {
        match self {
            View::CustomerIndex { .. } => "customer/index.html.twig",
            View::CustomerCard { .. } => "customer/card.html.twig",
            View::CustomerForm { .. } => "customer/form.html.twig",
            View::Login { .. } => "security/login.html.twig",
            View::Home { .. } => "site/main.html.twig",
        }
    }

    /// Returns the page title.
    pub fn title(&self) -> &str {
        match self {
            View::CustomerIndex { title, .. }
            | View::CustomerCard { title, .. }
            | View::CustomerForm { title, .. }
            | View::Login { title, .. }
            | View::Home { title, .. } => title,
        }
    }

    /// Returns the `is_admin` template flag; the login screen has none.
    pub fn is_admin(&self) -> Option<bool> {
        match self {
            View::CustomerIndex { is_admin, .. }
            | View::CustomerCard { is_admin, .. }
            | View::CustomerForm { is_admin, .. }
            | View::Home { is_admin, .. } => Some(*is_admin),
            View::Login { .. } => None,
        }
    }
}

/// Result of a controller action.
///
/// Access denial is not an outcome; it is returned as an
/// [`Error`](crate::Error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Render a page
    Render(View),
    /// Redirect elsewhere
    Redirect(Redirect),
}

impl Outcome {
    /// Creates a redirect outcome.
    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect(Redirect::to(location))
    }

    /// Returns the HTTP status for this outcome.
    ///
    /// Forms that failed validation are rendered with 200 as well.
    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Render(_) => 200,
            Outcome::Redirect(_) => 302,
        }
    }

    /// Returns the view if this outcome renders.
    pub fn view(&self) -> Option<&View> {
        match self {
            Outcome::Render(view) => Some(view),
            Outcome::Redirect(_) => None,
        }
    }

    /// Returns the redirect target if this outcome redirects.
    pub fn location(&self) -> Option<&str> {
        match self {
            Outcome::Redirect(redirect) => Some(&redirect.location),
            Outcome::Render(_) => None,
        }
    }
}
