//! Property tests for the access guard, delete tokens and sanitization.

use customer_guard::audit::{AuditEvent, AuditEventKind, AuditOutcome};
use customer_guard::{
    authorize, Action, Customer, CustomerId, CsrfToken, CsrfTokenManager, HmacCsrfTokenManager,
    Principal, PrincipalId, Sanitizer, Secret, StringSanitizer, Tainted,
};
use proptest::prelude::*;

fn arb_principal() -> impl Strategy<Value = Principal> {
    (1u64..20, any::<bool>()).prop_map(|(id, admin)| {
        if admin {
            Principal::administrator(id, "admin")
        } else {
            Principal::standard(id, "user")
        }
    })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

proptest! {
    /// Access is allowed exactly when the principal administers or owns
    /// the customer, whatever the action.
    #[test]
    fn proptest_guard_allows_only_admin_or_owner(
        principal in arb_principal(),
        owner in prop::option::of(1u64..20),
        action in arb_action(),
    ) {
        let customer = Customer::hydrate(CustomerId(7), "Acme", owner.map(PrincipalId), 1);

        let allowed = authorize(&principal, &customer, action).is_allowed();

        let expected = principal.is_admin() || owner == Some(principal.id.0);
        prop_assert_eq!(allowed, expected);
    }

    /// The decision depends on nothing but its inputs.
    #[test]
    fn proptest_guard_is_deterministic(
        principal in arb_principal(),
        owner in 1u64..20,
        action in arb_action(),
    ) {
        let customer = Customer::hydrate(CustomerId(1), "Acme", Some(PrincipalId(owner)), 3);

        let first = authorize(&principal, &customer, action);
        let second = authorize(&principal, &customer, action);

        prop_assert_eq!(first, second);
    }

    /// A delete token minted for one customer never deletes another.
    #[test]
    fn proptest_delete_token_is_scoped_to_customer(
        issued_for in 1u64..1000,
        used_for in 1u64..1000,
    ) {
        prop_assume!(issued_for != used_for);
        let tokens = HmacCsrfTokenManager::new(b"property-test-key").unwrap();
        let value = tokens.generate(&format!("delete{issued_for}"));

        let foreign = CsrfToken::for_delete("delete", CustomerId(used_for), value.clone());
        prop_assert!(!tokens.is_token_valid(&foreign));

        let own = CsrfToken::for_delete("delete", CustomerId(issued_for), value);
        prop_assert!(tokens.is_token_valid(&own));
    }

    /// Printable names within the limit come back trimmed.
    #[test]
    fn proptest_sanitizer_accepts_printable_names(
        name in prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9 .&-]{0,40}").unwrap(),
        padding in prop::string::string_regex("[ \\t]{0,3}").unwrap(),
    ) {
        let sanitizer = StringSanitizer::new(255);
        let input = format!("{padding}{name}{padding}");

        let verified = sanitizer.sanitize(Tainted::new(input)).unwrap();

        prop_assert_eq!(verified.into_inner(), name.trim());
    }

    /// Blank input and embedded control characters are always rejected.
    #[test]
    fn proptest_sanitizer_rejects_blank_and_control_chars(
        blank in prop::string::string_regex("[ \\t\\n\\r]{0,10}").unwrap(),
        control_chars in prop::collection::vec(prop::char::range('\x00', '\x1F'), 1..3),
    ) {
        let sanitizer = StringSanitizer::new(255);

        prop_assert!(sanitizer.sanitize(Tainted::new(blank)).is_err());

        let control: String = control_chars.iter().collect();
        let input = format!("before{control}after");
        prop_assert!(sanitizer.sanitize(Tainted::new(input)).is_err());
    }

    /// Audit events can be logged without exposing secrets.
    #[test]
    fn proptest_audit_events_never_leak_secrets(
        request_id in prop::string::string_regex("[a-z0-9-]{5,20}").unwrap(),
        principal in 1u64..1000,
        secret_value in prop::string::string_regex("[A-Z]{12,20}").unwrap(),
    ) {
        let secret = Secret::new(secret_value.clone());
        let event = AuditEvent::new(
            request_id.clone(),
            Some(PrincipalId(principal)),
            AuditEventKind::CustomerDeleted,
            AuditOutcome::Success,
        )
        .with_customer(CustomerId(principal));

        let rendered = format!("{event} {event:?} {secret:?}");

        prop_assert!(!rendered.contains(&secret_value));
        prop_assert!(rendered.contains(&request_id));
    }
}
