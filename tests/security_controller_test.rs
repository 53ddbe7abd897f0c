//! Login screen behaviour.

mod support;

use customer_guard::web::{AuthenticationState, LastAuthentication, SecurityController};
use customer_guard::{AppConfig, Method, Outcome, View};

use support::{admin, owner, request};

#[test]
fn guest_gets_login_form() {
    let controller = SecurityController::default();
    let auth = LastAuthentication {
        username: "alice".to_string(),
        error: None,
    };

    let outcome = controller.login(&request(None, Method::Get), &auth);

    let view = outcome.view().expect("rendered");
    assert_eq!(view.template(), "security/login.html.twig");
    assert_eq!(
        view,
        &View::Login {
            title: "Sign in".to_string(),
            last_username: "alice".to_string(),
            error: None,
        }
    );
}

#[test]
fn guest_sees_last_error() {
    let controller = SecurityController::default();
    let auth = LastAuthentication {
        username: "alice".to_string(),
        error: Some("Invalid credentials.".to_string()),
    };

    let outcome = controller.login(&request(None, Method::Post), &auth);

    match outcome {
        Outcome::Render(View::Login { error, .. }) => {
            assert_eq!(error.as_deref(), Some("Invalid credentials."))
        }
        other => panic!("expected login view, got {other:?}"),
    }
}

#[test]
fn signed_in_users_are_redirected_to_customers() {
    let controller = SecurityController::default();

    for principal in [owner(), admin()] {
        let outcome = controller.login(
            &request(Some(principal), Method::Get),
            &LastAuthentication::default(),
        );
        assert_eq!(outcome, Outcome::redirect("/customer"));
    }
}

#[test]
fn title_follows_locale() {
    let settings = AppConfig::from_toml_str(r#"locale = "ru""#)
        .unwrap()
        .settings();
    let controller = SecurityController::new(settings);

    let outcome = controller.login(&request(None, Method::Get), &LastAuthentication::default());

    assert_eq!(outcome.view().map(View::title), Some("Войдите"));
}

#[test]
fn custom_authentication_state() {
    struct Remembered;

    impl AuthenticationState for Remembered {
        fn last_username(&self) -> String {
            "bob".to_string()
        }

        fn last_authentication_error(&self) -> Option<String> {
            None
        }
    }

    let outcome = SecurityController::default().login(&request(None, Method::Get), &Remembered);

    match outcome {
        Outcome::Render(View::Login { last_username, .. }) => assert_eq!(last_username, "bob"),
        other => panic!("expected login view, got {other:?}"),
    }
}
