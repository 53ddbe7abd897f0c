//! Extraction traits implemented by request types.

use crate::form::FormData;
use crate::request::RequestMeta;

/// Extracts the request id and principal.
pub trait ExtractMetadata {
    /// Returns the request metadata.
    fn extract_metadata(&self) -> RequestMeta;
}

/// Extracts submitted fields as tainted form data.
pub trait ExtractFormData {
    /// Returns the form data; every value is [`Tainted`](crate::Tainted).
    fn extract_form_data(&self) -> FormData;
}
