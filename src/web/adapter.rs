//! Request adapter the host framework fills in.

use std::collections::HashMap;

use crate::form::FormData;
use crate::request::{Method, Principal, RequestMeta};
use crate::tainted::Tainted;

use super::{ExtractFormData, ExtractMetadata};

/// Form field carrying the anti-forgery token of the delete form.
pub const CSRF_TOKEN_FIELD: &str = "_token";

/// Framework-neutral view of one inbound request.
///
/// The framework resolves the principal from its session before calling a
/// controller. Field values are stored raw here and tainted on extraction.
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    principal: Option<Principal>,
    method: Method,
    form_fields: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates a `GET` request without a principal.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            principal: None,
            method: Method::Get,
            form_fields: HashMap::new(),
        }
    }

    /// Sets the resolved principal; `None` for guests.
    pub fn set_principal(&mut self, principal: Option<Principal>) {
        self.principal = principal;
    }

    /// Sets the HTTP method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Adds a submitted form field.
    pub fn add_form_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.form_fields.insert(key.into(), value.into());
    }

    /// Returns the request id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the resolved principal.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }
}

impl ExtractMetadata for RequestAdapter {
    fn extract_metadata(&self) -> RequestMeta {
        RequestMeta {
            request_id: self.request_id.clone(),
            principal: self.principal.clone(),
        }
    }
}

impl ExtractFormData for RequestAdapter {
    fn extract_form_data(&self) -> FormData {
        let mut data = FormData::new(self.method);
        for (key, value) in &self.form_fields {
            data.insert(key.clone(), Tainted::new(value.clone()));
        }
        data
    }
}
