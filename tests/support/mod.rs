//! Recording test doubles shared by the controller tests.

#![allow(dead_code)]

use std::cell::RefCell;

use customer_guard::form::{
    BoundForm, CustomerFormBinder, FieldError, FormData, FormOptions, FormView, NAME_FIELD,
};
use customer_guard::store::{CustomerStore, InMemoryCustomerStore, ServiceRequestStore};
use customer_guard::web::{CustomerController, RequestAdapter};
use customer_guard::{
    CsrfToken, CsrfTokenManager, Customer, CustomerId, Method, Principal, PrincipalId,
    SanitizationErrorKind, ServiceRequest, SessionFlashBag, Settings, StoreError,
};

/// Customer store that records every call and can fail on commit.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: InMemoryCustomerStore,
    pub calls: RefCell<Vec<String>>,
    pub fail_commit: Option<StoreError>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl CustomerStore for RecordingStore {
    fn find(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        self.log(format!("find({id})"));
        self.inner.find(id)
    }

    fn find_by_owner(&self, owner: PrincipalId) -> Result<Vec<Customer>, StoreError> {
        self.log(format!("find_by_owner({owner})"));
        self.inner.find_by_owner(owner)
    }

    fn register(&mut self, customer: Customer) -> Result<(), StoreError> {
        self.log("register");
        self.inner.register(customer)
    }

    fn merge(&mut self, customer: &Customer) -> Result<(), StoreError> {
        self.log("merge");
        self.inner.merge(customer)
    }

    fn remove(&mut self, customer: &Customer) -> Result<(), StoreError> {
        self.log("remove");
        self.inner.remove(customer)
    }

    fn commit(&mut self) -> Result<Vec<CustomerId>, StoreError> {
        self.log("commit");
        match &self.fail_commit {
            Some(err) => Err(err.clone()),
            None => self.inner.commit(),
        }
    }
}

/// Options a binder was called with, copied out of `FormOptions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenOptions {
    pub current_user: PrincipalId,
    pub is_admin: bool,
    pub current_customer: Option<CustomerId>,
}

/// Binder with a scripted result.
#[derive(Debug)]
pub struct StubBinder {
    pub submitted: bool,
    pub valid: bool,
    pub name: String,
    pub seen: RefCell<Vec<SeenOptions>>,
}

impl StubBinder {
    pub fn new(submitted: bool, valid: bool) -> Self {
        Self {
            submitted,
            valid,
            name: "Bound Name".to_string(),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenOptions> {
        self.seen.borrow().clone()
    }
}

impl CustomerFormBinder for StubBinder {
    fn bind(
        &self,
        customer: &mut Customer,
        _data: &FormData,
        options: &FormOptions<'_>,
    ) -> BoundForm {
        self.seen.borrow_mut().push(SeenOptions {
            current_user: options.current_user.id,
            is_admin: options.is_admin,
            current_customer: options.current_customer,
        });

        let errors = if self.submitted && !self.valid {
            vec![FieldError {
                field: NAME_FIELD.to_string(),
                kind: SanitizationErrorKind::Empty,
                message: "value should not be blank".to_string(),
            }]
        } else {
            if self.submitted {
                customer.set_name(self.name.clone());
            }
            Vec::new()
        };

        BoundForm::new(self.submitted, errors, FormView::default())
    }
}

/// Token manager with a fixed answer that records what it was asked.
#[derive(Debug)]
pub struct StubTokens {
    pub answer: bool,
    pub checked: RefCell<Vec<CsrfToken>>,
}

impl StubTokens {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            checked: RefCell::new(Vec::new()),
        }
    }

    pub fn checked(&self) -> Vec<CsrfToken> {
        self.checked.borrow().clone()
    }
}

impl CsrfTokenManager for StubTokens {
    fn is_token_valid(&self, token: &CsrfToken) -> bool {
        self.checked.borrow_mut().push(token.clone());
        self.answer
    }
}

/// Service request store that records which query was used.
#[derive(Debug, Default)]
pub struct RecordingRequests {
    pub requests: Vec<ServiceRequest>,
    pub calls: RefCell<Vec<String>>,
}

impl RecordingRequests {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ServiceRequestStore for RecordingRequests {
    fn find_for_owner(&self, owner: PrincipalId) -> Result<Vec<ServiceRequest>, StoreError> {
        self.calls.borrow_mut().push(format!("find_for_owner({owner})"));
        Ok(self
            .requests
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect())
    }

    fn find_all_ordered(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        self.calls.borrow_mut().push("find_all_ordered".to_string());
        Ok(self.requests.clone())
    }
}

pub type TestController = CustomerController<RecordingStore, StubBinder, StubTokens, SessionFlashBag>;

pub fn controller(binder: StubBinder, tokens: StubTokens) -> TestController {
    CustomerController::new(
        RecordingStore::new(),
        binder,
        tokens,
        SessionFlashBag::new(),
        Settings::default(),
    )
}

pub fn request(principal: Option<Principal>, method: Method) -> RequestAdapter {
    let mut adapter = RequestAdapter::new("req-test".to_string());
    adapter.set_principal(principal);
    adapter.set_method(method);
    adapter
}

pub fn owner() -> Principal {
    Principal::standard(1, "owner")
}

pub fn stranger() -> Principal {
    Principal::standard(2, "stranger")
}

pub fn admin() -> Principal {
    Principal::administrator(3, "admin")
}

pub fn service_request(id: u64, owner: u64) -> ServiceRequest {
    ServiceRequest {
        id,
        title: format!("Request {id}"),
        customer: CustomerId(id),
        customer_name: format!("Customer {id}"),
        owner: PrincipalId(owner),
    }
}
