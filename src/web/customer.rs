use crate::audit::{AuditEvent, AuditEventKind, AuditOutcome, AuditTrail};
use crate::capability::Grant;
use crate::config::{AppConfig, ConfigError, Settings};
use crate::context::Ctx;
use crate::csrf::{CsrfTokenManager, HmacCsrfTokenManager};
use crate::customer::{Customer, CustomerId};
use crate::error::Error;
use crate::flash::FlashBag;
use crate::form::{CustomerFormBinder, CustomerType};
use crate::guard::{self, Action};
use crate::outcome::{Outcome, View};
use crate::state::Authed;
use crate::store::CustomerStore;
use crate::workflow::{SaveMode, Workflow};

use super::{extract_authed, ExtractFormData, ExtractMetadata, CSRF_TOKEN_FIELD};

/// Customer pages: listing, card, create, edit and delete.
///
/// Collaborators are injected at construction and owned by the controller.
/// Every action requires a signed-in principal; the per-customer actions
/// also run the access guard before touching the form, the token or the
/// store.
#[derive(Debug)]
pub struct CustomerController<S, B, T, F> {
    store: S,
    binder: B,
    tokens: T,
    flash: F,
    audit: AuditTrail,
    settings: Settings,
}

impl<S, F> CustomerController<S, CustomerType, HmacCsrfTokenManager, F>
where
    S: CustomerStore,
    F: FlashBag,
{
    /// Builds a controller with the stock form and token manager.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the CSRF key is unusable.
    pub fn from_config(config: &AppConfig, store: S, flash: F) -> Result<Self, ConfigError> {
        let settings = config.settings();
        Ok(Self::new(
            store,
            CustomerType::new(settings.name_max_len),
            HmacCsrfTokenManager::from_config(&config.csrf)?,
            flash,
            settings,
        ))
    }
}

impl<S, B, T, F> CustomerController<S, B, T, F>
where
    S: CustomerStore,
    B: CustomerFormBinder,
    T: CsrfTokenManager,
    F: FlashBag,
{
    /// Creates a controller from its collaborators.
    pub fn new(store: S, binder: B, tokens: T, flash: F, settings: Settings) -> Self {
        Self {
            store,
            binder,
            tokens,
            flash,
            audit: AuditTrail::new(),
            settings,
        }
    }

    /// Replaces the audit trail, e.g. with
    /// [`AuditTrail::with_capacity(0)`](AuditTrail::with_capacity) to only log.
    pub fn with_audit(mut self, audit: AuditTrail) -> Self {
        self.audit = audit;
        self
    }

    /// Lists the principal's customers, newest first.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for guests, [`Error::Store`] if loading fails.
    pub fn index<R>(&self, request: &R) -> Result<Outcome, Error>
    where
        R: ExtractMetadata + ExtractFormData,
    {
        let ctx = extract_authed(request)?.context;
        let customers = self.store.find_by_owner(ctx.principal().id)?;

        Ok(Outcome::Render(View::CustomerIndex {
            title: self.settings.messages.title_customers.to_string(),
            customers,
            is_admin: ctx.is_admin(),
        }))
    }

    /// Shows one customer.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for guests, [`Error::NotFound`] for unknown ids, an
    /// access-denied error for principals who neither own the customer nor
    /// administer.
    pub fn show<R>(&self, request: &R, id: CustomerId) -> Result<Outcome, Error>
    where
        R: ExtractMetadata + ExtractFormData,
    {
        let ctx = extract_authed(request)?.context;
        let customer = self.load(id)?;
        self.authorize(&ctx, &customer, Action::View)?;

        Ok(Outcome::Render(View::CustomerCard {
            title: self.settings.messages.title_customer.to_string(),
            customer,
            is_admin: ctx.is_admin(),
        }))
    }

    /// Create form. The new customer is owned by the current principal.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for guests, [`Error::Store`] if saving fails.
    pub fn add<R>(&mut self, request: &R) -> Result<Outcome, Error>
    where
        R: ExtractMetadata + ExtractFormData,
    {
        let extraction = extract_authed(request)?;
        self.workflow()
            .save_customer(&extraction.context, SaveMode::Create, &extraction.form)
    }

    /// Edit form.
    ///
    /// # Errors
    ///
    /// As [`show`](Self::show), plus [`Error::Store`] if saving fails. On
    /// denial nothing is bound and nothing is flashed.
    pub fn edit<R>(&mut self, request: &R, id: CustomerId) -> Result<Outcome, Error>
    where
        R: ExtractMetadata + ExtractFormData,
    {
        let extraction = extract_authed(request)?;
        let ctx = extraction.context;
        let customer = self.load(id)?;
        let grant = self.authorize(&ctx, &customer, Action::Edit)?;

        self.workflow()
            .save_customer(&ctx, SaveMode::Edit { grant, customer }, &extraction.form)
    }

    /// Deletes a customer if the `_token` field is valid for it.
    ///
    /// Always redirects to the listing unless the guard denies.
    ///
    /// # Errors
    ///
    /// As [`show`](Self::show), plus [`Error::Store`] if removal fails. On
    /// denial the token is not examined.
    pub fn delete<R>(&mut self, request: &R, id: CustomerId) -> Result<Outcome, Error>
    where
        R: ExtractMetadata + ExtractFormData,
    {
        let extraction = extract_authed(request)?;
        let ctx = extraction.context;
        let customer = self.load(id)?;
        let grant = self.authorize(&ctx, &customer, Action::Delete)?;
        let token = extraction.form.field(CSRF_TOKEN_FIELD).cloned();

        self.workflow().delete_customer(&ctx, grant, &customer, token)
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store mutably, for seeding.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the form binder.
    pub fn binder(&self) -> &B {
        &self.binder
    }

    /// Returns the token manager.
    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    /// Returns the flash bag.
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Returns the flash bag mutably.
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Returns the audit trail.
    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    /// Returns the request-time settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn load(&self, id: CustomerId) -> Result<Customer, Error> {
        self.store.find(id)?.ok_or(Error::NotFound(id))
    }

    fn authorize(
        &self,
        ctx: &Ctx<Authed>,
        customer: &Customer,
        action: Action,
    ) -> Result<Grant, Error> {
        guard::require(ctx, customer, action).map_err(|err| {
            self.audit.emit(
                AuditEvent::new(
                    ctx.request_id(),
                    Some(ctx.principal().id),
                    AuditEventKind::Authorization,
                    AuditOutcome::Denied,
                )
                .with_action(action)
                .with_customer(customer.id()),
            );
            err
        })
    }

    fn workflow(&mut self) -> Workflow<'_, S, B, T, F> {
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
