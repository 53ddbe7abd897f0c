use crate::config::Settings;
use crate::outcome::{Outcome, View};

use super::{extract_unauthed, ExtractFormData, ExtractMetadata};

/// What the authentication layer remembers about the last login attempt.
pub trait AuthenticationState {
    /// Username entered on the last attempt, empty if none.
    fn last_username(&self) -> String;

    /// Error of the last failed attempt.
    fn last_authentication_error(&self) -> Option<String>;
}

/// Plain [`AuthenticationState`] value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastAuthentication {
    /// Last entered username
    pub username: String,
    /// Last error
    pub error: Option<String>,
}

impl AuthenticationState for LastAuthentication {
    fn last_username(&self) -> String {
        self.username.clone()
    }

    fn last_authentication_error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Login screen.
#[derive(Debug, Clone, Default)]
pub struct SecurityController {
    settings: Settings,
}

impl SecurityController {
    /// Creates the controller.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Renders the login form for guests and redirects signed-in users to
    /// the customer listing.
    ///
    /// # Examples
    ///
    /// ```
    /// use customer_guard::web::{LastAuthentication, RequestAdapter, SecurityController};
    /// use customer_guard::Principal;
    ///
    /// let controller = SecurityController::default();
    /// let mut request = RequestAdapter::new("req-1".to_string());
    /// request.set_principal(Some(Principal::standard(1, "alice")));
    ///
    /// let outcome = controller.login(&request, &LastAuthentication::default());
    /// assert_eq!(outcome.location(), Some("/customer"));
    /// ```
    pub fn login<R, A>(&self, request: &R, auth: &A) -> Outcome
    where
        R: ExtractMetadata + ExtractFormData,
        A: AuthenticationState + ?Sized,
    {
        let ctx = extract_unauthed(request).context;

        if let Some(principal) = ctx.principal() {
            ctx.log().debug(format_args!(
                "principal {} already signed in, redirecting",
                principal.id
            ));
            return Outcome::redirect(&self.settings.routes.customer_index);
        }

        Outcome::Render(View::Login {
            title: self.settings.messages.title_login.to_string(),
            last_username: auth.last_username(),
            error: auth.last_authentication_error(),
        })
    }
}
