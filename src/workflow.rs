//! Customer mutation workflows.
//!
//! [`Workflow::save_customer`] drives the create and edit forms,
//! [`Workflow::delete_customer`] the token-guarded removal. Both expect the
//! access guard to have run already: edit and delete demand a [`Grant`] for
//! the matching action and customer.

use crate::audit::{AuditEvent, AuditEventKind, AuditOutcome, AuditTrail};
use crate::capability::Grant;
use crate::config::Settings;
use crate::context::Ctx;
use crate::csrf::{CsrfToken, CsrfTokenManager};
use crate::customer::{Customer, CustomerId};
use crate::error::{Error, Violation};
use crate::flash::{FlashBag, FlashCategory};
use crate::form::{CustomerFormBinder, FormData, FormOptions};
use crate::guard::Action;
use crate::outcome::{Outcome, View};
use crate::state::Authed;
use crate::store::{CustomerStore, StoreError};
use crate::tainted::Tainted;

/// Which form is being saved.
#[derive(Debug)]
pub enum SaveMode {
    /// A new customer owned by the current principal
    Create,
    /// An existing customer the guard approved for editing
    Edit {
        /// Proof of an `Edit` approval for `customer`
        grant: Grant,
        /// The customer as loaded from the store
        customer: Customer,
    },
}

/// Borrowed collaborators for one controller call.
#[derive(Debug)]
pub struct Workflow<'a, S, B, T, F> {
    store: &'a mut S,
    binder: &'a B,
    tokens: &'a T,
    flash: &'a mut F,
    audit: &'a AuditTrail,
    settings: &'a Settings,
}

impl<'a, S, B, T, F> Workflow<'a, S, B, T, F>
where
    S: CustomerStore,
    B: CustomerFormBinder,
    T: CsrfTokenManager,
    F: FlashBag,
{
    /// Bundles the collaborators.
    pub fn new(
        store: &'a mut S,
        binder: &'a B,
        tokens: &'a T,
        flash: &'a mut F,
        audit: &'a AuditTrail,
        settings: &'a Settings,
    ) -> Self {
        Self {
            store,
            binder,
            tokens,
            flash,
            audit,
            settings,
        }
    }

    /// Runs the create or edit form.
    ///
    /// Unsubmitted and invalid forms render the form view. A valid
    /// submission is persisted, followed by a success flash and a redirect to
    /// the customer listing.
    ///
    /// # Errors
    ///
    /// Returns an access-denied error if the grant does not cover editing
    /// this customer, and [`Error::Store`] if persisting fails. No flash is
    /// posted in either case.
    pub fn save_customer(
        &mut self,
        ctx: &Ctx<Authed>,
        mode: SaveMode,
        data: &FormData,
    ) -> Result<Outcome, Error> {
        let principal = ctx.principal();
        let messages = self.settings.messages;

        let (mut customer, title) = match mode {
            SaveMode::Create => (Customer::new(principal.id), messages.title_customer_new),
            SaveMode::Edit { grant, customer } => {
                if customer.is_new() || !grant.covers(Action::Edit, customer.id()) {
                    return Err(Violation::access_denied(Action::Edit, customer.id()).into());
                }
                (customer, messages.title_customer_edit)
            }
        };

        let options = match customer.id() {
            Some(id) => FormOptions::for_edit(principal, id),
            None => FormOptions::for_create(principal),
        };
        let form = self.binder.bind(&mut customer, data, &options);

        if !form.was_submitted() || !form.is_valid() {
            if form.was_submitted() {
                ctx.log().debug(format_args!(
                    "customer form rejected with {} error(s)",
                    form.errors().len()
                ));
            }
            return Ok(Outcome::Render(View::CustomerForm {
                title: title.to_string(),
                form: form.into_view(),
                customer: customer.id(),
                is_admin: options.is_admin,
            }));
        }

        let creating = customer.is_new();
        let existing = customer.id();
        let (kind, flash) = if creating {
            (AuditEventKind::CustomerCreated, messages.customer_created)
        } else {
            (AuditEventKind::CustomerUpdated, messages.customer_updated)
        };

        let saved = match self.persist(customer) {
            Ok(id) => id,
            Err(err) => {
                ctx.log().error(format_args!("saving customer failed: {err}"));
                self.audit_event(ctx, kind, AuditOutcome::Error, existing);
                return Err(err.into());
            }
        };

        self.flash.add(FlashCategory::Success, flash);
        self.audit_event(ctx, kind, AuditOutcome::Success, saved);
        ctx.log().info(format_args!(
            "customer {} {}",
            saved.map_or_else(|| "?".to_string(), |id| id.to_string()),
            if creating { "created" } else { "updated" }
        ));

        Ok(Outcome::redirect(&self.settings.routes.customer_index))
    }

    /// Removes `customer` if the submitted token is valid for it.
    ///
    /// The token must have been issued for the delete scope and this
    /// customer's id. A valid token removes the customer and posts a success
    /// flash; anything else posts an error flash and changes nothing. Both
    /// paths redirect to the customer listing.
    ///
    /// # Errors
    ///
    /// Returns an access-denied error if the grant does not cover deleting
    /// this customer (the token is not examined then), and [`Error::Store`]
    /// if removal fails.
    pub fn delete_customer(
        &mut self,
        ctx: &Ctx<Authed>,
        grant: Grant,
        customer: &Customer,
        token: Option<Tainted<String>>,
    ) -> Result<Outcome, Error> {
        let id = match customer.id() {
            Some(id) if grant.covers(Action::Delete, Some(id)) => id,
            other => return Err(Violation::access_denied(Action::Delete, other).into()),
        };
        let messages = self.settings.messages;

        // The MAC check below validates the raw value.
        let submitted = token.map(Tainted::into_inner).unwrap_or_default();
        let token = CsrfToken::for_delete(&self.settings.delete_scope, id, submitted);

        if token.value().is_empty() || !self.tokens.is_token_valid(&token) {
            ctx.log()
                .warn(format_args!("delete of customer {id} refused: invalid csrf token"));
            self.flash.add(FlashCategory::Error, messages.invalid_csrf_token);
            self.audit_event(ctx, AuditEventKind::TokenRejected, AuditOutcome::Denied, Some(id));
            return Ok(Outcome::redirect(&self.settings.routes.customer_index));
        }

        let removed = self
            .store
            .remove(customer)
            .and_then(|()| self.store.commit());
        if let Err(err) = removed {
            ctx.log()
                .error(format_args!("deleting customer {id} failed: {err}"));
            self.audit_event(
                ctx,
                AuditEventKind::CustomerDeleted,
                AuditOutcome::Error,
                Some(id),
            );
            return Err(err.into());
        }

        self.flash.add(FlashCategory::Success, messages.customer_deleted);
        self.audit_event(
            ctx,
            AuditEventKind::CustomerDeleted,
            AuditOutcome::Success,
            Some(id),
        );
        ctx.log().info(format_args!("customer {id} deleted"));

        Ok(Outcome::redirect(&self.settings.routes.customer_index))
    }

    // Returns the id of the saved customer; new ids come from the commit.
    fn persist(&mut self, customer: Customer) -> Result<Option<CustomerId>, StoreError> {
        if customer.is_new() {
            self.store.register(customer)?;
            let ids = self.store.commit()?;
            Ok(ids.first().copied())
        } else {
            let id = customer.id();
            self.store.merge(&customer)?;
            self.store.commit()?;
            Ok(id)
        }
    }

    fn audit_event(
        &self,
        ctx: &Ctx<Authed>,
        kind: AuditEventKind,
        outcome: AuditOutcome,
        customer: Option<CustomerId>,
    ) {
        let action = match kind {
            AuditEventKind::CustomerDeleted | AuditEventKind::TokenRejected => Action::Delete,
            _ => Action::Edit,
        };
        self.audit.emit(
            AuditEvent::new(ctx.request_id(), Some(ctx.principal().id), kind, outcome)
                .with_action(action)
                .with_customer(customer),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csrf::HmacCsrfTokenManager;
    use crate::flash::SessionFlashBag;
    use crate::form::{CustomerType, NAME_FIELD};
    use crate::guard;
    use crate::request::{Method, Principal, PrincipalId, RequestMeta};
    use crate::store::InMemoryCustomerStore;

    struct Fixture {
        store: InMemoryCustomerStore,
        binder: CustomerType,
        tokens: HmacCsrfTokenManager,
        flash: SessionFlashBag,
        audit: AuditTrail,
        settings: Settings,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: InMemoryCustomerStore::new(),
                binder: CustomerType::default(),
                tokens: HmacCsrfTokenManager::new(b"workflow-tests").unwrap(),
                flash: SessionFlashBag::new(),
                audit: AuditTrail::new(),
                settings: Settings::default(),
            }
        }

        fn workflow(
            &mut self,
        ) -> Workflow<'_, InMemoryCustomerStore, CustomerType, HmacCsrfTokenManager, SessionFlashBag>
        {
            Workflow::new(
                &mut self.store,
                &self.binder,
                &self.tokens,
                &mut self.flash,
                &self.audit,
                &self.settings,
            )
        }
    }

    fn ctx(principal: Principal) -> Ctx<Authed> {
        Ctx::new_unauthed(RequestMeta {
            request_id: "req-wf".to_string(),
            principal: Some(principal),
        })
        .authenticate()
        .unwrap()
    }

    fn post_name(name: &str) -> FormData {
        FormData::new(Method::Post).with_field(NAME_FIELD, name)
    }

    #[test]
    fn create_persists_flashes_and_redirects() {
        let mut fx = Fixture::new();
        let ctx = ctx(Principal::standard(1, "alice"));

        let outcome = fx
            .workflow()
            .save_customer(&ctx, SaveMode::Create, &post_name("Acme"))
            .unwrap();

        assert_eq!(outcome.location(), Some("/customer"));
        assert_eq!(fx.flash.peek(FlashCategory::Success), vec!["Customer created"]);
        let saved = fx.store.find_by_owner(PrincipalId(1)).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name(), "Acme");
        assert_eq!(fx.audit.events()[0].kind(), AuditEventKind::CustomerCreated);
    }

    #[test]
    fn get_renders_form_without_side_effects() {
        let mut fx = Fixture::new();
        let ctx = ctx(Principal::standard(1, "alice"));

        let outcome = fx
            .workflow()
            .save_customer(&ctx, SaveMode::Create, &FormData::new(Method::Get))
            .unwrap();

        let view = outcome.view().expect("form rendered");
        assert_eq!(view.template(), "customer/form.html.twig");
        assert_eq!(view.title(), "New customer");
        assert!(fx.store.is_empty());
        assert!(fx.flash.is_empty());
    }

    #[test]
    fn edit_with_foreign_grant_is_denied() {
        let mut fx = Fixture::new();
        let a = fx.store.seed("A", PrincipalId(1));
        let b = fx.store.seed("B", PrincipalId(1));
        let ctx = ctx(Principal::standard(1, "alice"));
        let customer_a = fx.store.find(a).unwrap().unwrap();
        let customer_b = fx.store.find(b).unwrap().unwrap();
        let grant_for_a = guard::require(&ctx, &customer_a, Action::Edit).unwrap();

        let err = fx
            .workflow()
            .save_customer(
                &ctx,
                SaveMode::Edit {
                    grant: grant_for_a,
                    customer: customer_b,
                },
                &post_name("Hijacked"),
            )
            .unwrap_err();

        assert!(err.is_access_denied());
        assert_eq!(fx.store.find(b).unwrap().unwrap().name(), "B");
    }

    #[test]
    fn delete_without_token_flashes_error() {
        let mut fx = Fixture::new();
        let id = fx.store.seed("Acme", PrincipalId(1));
        let ctx = ctx(Principal::standard(1, "alice"));
        let customer = fx.store.find(id).unwrap().unwrap();
        let grant = guard::require(&ctx, &customer, Action::Delete).unwrap();

        let outcome = fx
            .workflow()
            .delete_customer(&ctx, grant, &customer, None)
            .unwrap();

        assert_eq!(outcome.location(), Some("/customer"));
        assert_eq!(fx.flash.peek(FlashCategory::Error), vec!["Invalid CSRF token"]);
        assert!(fx.store.find(id).unwrap().is_some());
    }

    #[test]
    fn delete_with_valid_token_removes() {
        let mut fx = Fixture::new();
        let id = fx.store.seed("Acme", PrincipalId(1));
        let ctx = ctx(Principal::administrator(9, "root"));
        let customer = fx.store.find(id).unwrap().unwrap();
        let grant = guard::require(&ctx, &customer, Action::Delete).unwrap();
        let value = fx.tokens.generate(&format!("delete{id}"));

        let outcome = fx
            .workflow()
            .delete_customer(&ctx, grant, &customer, Some(Tainted::new(value)))
            .unwrap();

        assert_eq!(outcome.location(), Some("/customer"));
        assert_eq!(fx.flash.peek(FlashCategory::Success), vec!["Customer deleted"]);
        assert!(fx.store.find(id).unwrap().is_none());
    }
}
