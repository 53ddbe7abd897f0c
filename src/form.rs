//! Customer form binding.
//!
//! A [`CustomerFormBinder`] copies submitted fields into a [`Customer`] and
//! reports what went wrong. Raw fields arrive as [`Tainted`] values and reach
//! the customer only after passing a [`Sanitizer`].

use std::collections::HashMap;

use crate::customer::{Customer, CustomerId, Owned};
use crate::request::{Method, Principal};
use crate::sanitizer::{SanitizationErrorKind, Sanitizer, StringSanitizer};
use crate::tainted::Tainted;

/// Name of the customer name field.
pub const NAME_FIELD: &str = "name";
/// Name of the read-only owner field shown to administrators.
pub const OWNER_FIELD: &str = "owner";

/// Submitted form fields plus the method they arrived with.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    method: Method,
    fields: HashMap<String, Tainted<String>>,
}

impl FormData {
    /// Creates an empty form for a request with `method`.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            fields: HashMap::new(),
        }
    }

    /// Adds a raw field value, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Tainted::new(value.into()));
        self
    }

    /// Adds an already tainted field value.
    pub fn insert(&mut self, name: impl Into<String>, value: Tainted<String>) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns `true` if the request submits the form.
    pub fn is_submitted(&self) -> bool {
        self.method.submits_form()
    }

    /// Returns a field by name.
    pub fn field(&self, name: &str) -> Option<&Tainted<String>> {
        self.fields.get(name)
    }

    /// Returns `true` if a field with this name was submitted.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Per-request form options.
///
/// Both modes carry the same fields; `current_customer` is `None` when
/// creating and `Some` when editing.
#[derive(Debug, Clone, Copy)]
pub struct FormOptions<'a> {
    /// The signed-in principal
    pub current_user: &'a Principal,
    /// Whether the principal is an administrator
    pub is_admin: bool,
    /// The customer being edited
    pub current_customer: Option<CustomerId>,
}

impl<'a> FormOptions<'a> {
    /// Options for the create form.
    pub fn for_create(current_user: &'a Principal) -> Self {
        Self {
            current_user,
            is_admin: current_user.is_admin(),
            current_customer: None,
        }
    }

    /// Options for the edit form of `customer`.
    pub fn for_edit(current_user: &'a Principal, customer: CustomerId) -> Self {
        Self {
            current_user,
            is_admin: current_user.is_admin(),
            current_customer: Some(customer),
        }
    }
}

/// A validation failure on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Failure category
    pub kind: SanitizationErrorKind,
    /// Message for display next to the field
    pub message: String,
}

/// One rendered form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Field name
    pub name: String,
    /// Current value
    pub value: String,
    /// Displayed but not editable
    pub read_only: bool,
    /// Validation messages for this field
    pub errors: Vec<String>,
}

/// Render model of the customer form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    /// Fields in display order
    pub fields: Vec<FieldView>,
}

impl FormView {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if any field carries an error.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| !f.errors.is_empty())
    }
}

/// Result of binding a request to a customer.
#[derive(Debug, Clone)]
pub struct BoundForm {
    submitted: bool,
    errors: Vec<FieldError>,
    view: FormView,
}

impl BoundForm {
    /// Creates a bound form.
    pub fn new(submitted: bool, errors: Vec<FieldError>, view: FormView) -> Self {
        Self {
            submitted,
            errors,
            view,
        }
    }

    /// Returns `true` if the request submitted the form.
    pub fn was_submitted(&self) -> bool {
        self.submitted
    }

    /// Returns `true` if no field failed validation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation failures.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the render model.
    pub fn view(&self) -> &FormView {
        &self.view
    }

    /// Consumes the form, returning the render model.
    pub fn into_view(self) -> FormView {
        self.view
    }
}

/// Binds request data to a customer.
pub trait CustomerFormBinder {
    /// Copies valid submitted fields into `customer` and reports the result.
    ///
    /// Implementations must never change the customer's owner.
    fn bind(&self, customer: &mut Customer, data: &FormData, options: &FormOptions<'_>)
        -> BoundForm;
}

/// The customer form: an editable `name` and, for administrators, a
/// read-only `owner` field.
///
/// Submitted `owner` values are ignored.
///
/// # Examples
///
/// ```
/// use customer_guard::form::{CustomerFormBinder, CustomerType, FormData, FormOptions};
/// use customer_guard::{Customer, Method, Principal};
///
/// let user = Principal::standard(1, "alice");
/// let mut customer = Customer::new(user.id);
/// let data = FormData::new(Method::Post).with_field("name", " Acme Ltd ");
///
/// let form = CustomerType::new(255).bind(&mut customer, &data, &FormOptions::for_create(&user));
///
/// assert!(form.was_submitted() && form.is_valid());
/// assert_eq!(customer.name(), "Acme Ltd");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CustomerType {
    name: StringSanitizer,
}

impl CustomerType {
    /// Creates the form with a maximum name length in characters.
    pub fn new(name_max_len: usize) -> Self {
        Self {
            name: StringSanitizer::new(name_max_len),
        }
    }

    // On failure also returns the submitted text so the form can show it again.
    fn bind_name(
        &self,
        customer: &mut Customer,
        data: &FormData,
    ) -> Result<(), (FieldError, String)> {
        let Some(raw) = data.field(NAME_FIELD) else {
            let error = FieldError {
                field: NAME_FIELD.to_string(),
                kind: SanitizationErrorKind::Empty,
                message: "value should not be blank".to_string(),
            };
            return Err((error, String::new()));
        };

        match self.name.sanitize(raw.clone()) {
            Ok(name) => {
                customer.set_name(name.into_inner());
                Ok(())
            }
            Err(err) => {
                let error = FieldError {
                    field: NAME_FIELD.to_string(),
                    kind: err.kind(),
                    message: err.message().to_string(),
                };
                Err((error, raw.clone().into_inner()))
            }
        }
    }

    fn view(
        customer: &Customer,
        name: &str,
        errors: &[FieldError],
        options: &FormOptions<'_>,
    ) -> FormView {
        let messages_for = |field: &str| {
            errors
                .iter()
                .filter(|e| e.field == field)
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
        };

        let mut fields = vec![FieldView {
            name: NAME_FIELD.to_string(),
            value: name.to_string(),
            read_only: false,
            errors: messages_for(NAME_FIELD),
        }];

        if options.is_admin {
            fields.push(FieldView {
                name: OWNER_FIELD.to_string(),
                value: customer.owner().map(|o| o.to_string()).unwrap_or_default(),
                read_only: true,
                errors: Vec::new(),
            });
        }

        FormView { fields }
    }
}

impl Default for CustomerType {
    fn default() -> Self {
        Self::new(crate::config::FormConfig::default().name_max_len)
    }
}

impl CustomerFormBinder for CustomerType {
    fn bind(
        &self,
        customer: &mut Customer,
        data: &FormData,
        options: &FormOptions<'_>,
    ) -> BoundForm {
        if !data.is_submitted() {
            let view = Self::view(customer, customer.name(), &[], options);
            return BoundForm::new(false, Vec::new(), view);
        }

        if data.contains(OWNER_FIELD) {
            tracing::debug!(
                principal = %options.current_user.id,
                customer = ?options.current_customer,
                "ignoring submitted owner field"
            );
        }

        let (errors, shown_name) = match self.bind_name(customer, data) {
            Ok(()) => (Vec::new(), customer.name().to_string()),
            Err((error, submitted)) => (vec![error], submitted),
        };
        tracing::debug!(
            customer = ?options.current_customer,
            errors = errors.len(),
            "customer form bound"
        );

        let view = Self::view(customer, &shown_name, &errors, options);
        BoundForm::new(true, errors, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PrincipalId;

    fn bind_as(principal: &Principal, customer: &mut Customer, data: &FormData) -> BoundForm {
        CustomerType::new(255).bind(customer, data, &FormOptions::for_create(principal))
    }

    #[test]
    fn get_request_is_not_submitted() {
        let user = Principal::standard(1, "alice");
        let mut customer = Customer::new(user.id);

        let form = bind_as(&user, &mut customer, &FormData::new(Method::Get));

        assert!(!form.was_submitted());
        assert_eq!(customer.name(), "");
    }

    #[test]
    fn blank_name_is_invalid_and_not_written() {
        let user = Principal::standard(1, "alice");
        let mut customer = Customer::hydrate(CustomerId(3), "Acme", Some(user.id), 1);
        let data = FormData::new(Method::Post).with_field(NAME_FIELD, "   ");

        let form = bind_as(&user, &mut customer, &data);

        assert!(form.was_submitted());
        assert!(!form.is_valid());
        assert_eq!(form.errors()[0].kind, SanitizationErrorKind::Empty);
        assert_eq!(customer.name(), "Acme");
        assert!(form.view().has_errors());
    }

    #[test]
    fn missing_name_field_is_invalid() {
        let user = Principal::standard(1, "alice");
        let mut customer = Customer::new(user.id);

        let form = bind_as(&user, &mut customer, &FormData::new(Method::Post));

        assert!(!form.is_valid());
        assert_eq!(form.view().field(NAME_FIELD).unwrap().errors.len(), 1);
    }

    #[test]
    fn submitted_owner_is_ignored() {
        let admin = Principal::administrator(9, "root");
        let mut customer = Customer::hydrate(CustomerId(3), "Acme", Some(PrincipalId(1)), 1);
        let data = FormData::new(Method::Post)
            .with_field(NAME_FIELD, "Acme Group")
            .with_field(OWNER_FIELD, "9");

        let form = CustomerType::new(255).bind(
            &mut customer,
            &data,
            &FormOptions::for_edit(&admin, CustomerId(3)),
        );

        assert!(form.is_valid());
        assert_eq!(customer.name(), "Acme Group");
        assert_eq!(customer.owner(), Some(PrincipalId(1)));
    }

    #[test]
    fn owner_field_is_read_only_and_admin_only() {
        let owner = Principal::standard(1, "alice");
        let admin = Principal::administrator(9, "root");
        let mut customer = Customer::hydrate(CustomerId(3), "Acme", Some(owner.id), 1);
        let data = FormData::new(Method::Get);

        let as_owner = bind_as(&owner, &mut customer, &data);
        let as_admin = bind_as(&admin, &mut customer, &data);

        assert!(as_owner.view().field(OWNER_FIELD).is_none());
        let field = as_admin.view().field(OWNER_FIELD).expect("admin sees owner");
        assert!(field.read_only);
        assert_eq!(field.value, "1");
    }

    #[test]
    fn rejected_name_is_shown_again() {
        let user = Principal::standard(1, "alice");
        let mut customer = Customer::hydrate(CustomerId(3), "Acme", Some(user.id), 1);
        let too_long = "x".repeat(300);
        let data = FormData::new(Method::Post).with_field(NAME_FIELD, too_long.clone());

        let form = CustomerType::new(255).bind(
            &mut customer,
            &data,
            &FormOptions::for_edit(&user, CustomerId(3)),
        );

        assert!(!form.is_valid());
        let field = form.view().field(NAME_FIELD).unwrap();
        assert_eq!(field.value, too_long);
        assert_eq!(field.errors.len(), 1);
        assert_eq!(customer.name(), "Acme");
    }

    #[test]
    fn accepted_name_is_shown_trimmed() {
        let user = Principal::standard(1, "alice");
        let mut customer = Customer::new(user.id);
        let data = FormData::new(Method::Post).with_field(NAME_FIELD, "  Acme  ");

        let form = bind_as(&user, &mut customer, &data);

        assert_eq!(form.view().field(NAME_FIELD).unwrap().value, "Acme");
    }

    #[test]
    fn options_are_symmetric() {
        let user = Principal::administrator(1, "root");

        let create = FormOptions::for_create(&user);
        let edit = FormOptions::for_edit(&user, CustomerId(4));

        assert!(create.is_admin && edit.is_admin);
        assert_eq!(create.current_customer, None);
        assert_eq!(edit.current_customer, Some(CustomerId(4)));
    }

    #[test]
    fn name_longer_than_limit_is_rejected() {
        let user = Principal::standard(1, "alice");
        let mut customer = Customer::new(user.id);
        let data = FormData::new(Method::Post).with_field(NAME_FIELD, "x".repeat(11));

        let form = CustomerType::new(10).bind(&mut customer, &data, &FormOptions::for_create(&user));

        assert_eq!(form.errors()[0].kind, SanitizationErrorKind::TooLong);
    }
}
