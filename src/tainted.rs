use std::fmt;

/// A form value as it arrived from the client.
///
/// `Tainted<T>` has no accessor. The only way to read the value is to hand it
/// to a [`Sanitizer`](crate::Sanitizer), which returns a
/// [`Verified<T>`](crate::Verified) on success. Binding code therefore cannot
/// write raw request data into a customer record by accident.
///
/// # Examples
///
/// ```
/// use customer_guard::{Sanitizer, StringSanitizer, Tainted};
///
/// let raw = Tainted::new("  Acme Ltd  ".to_string());
/// let name = StringSanitizer::new(255).sanitize(raw).expect("valid name");
///
/// assert_eq!(name.as_ref(), "Acme Ltd");
/// ```
///
/// Outside this crate the raw value cannot be taken out:
///
/// ```compile_fail
/// use customer_guard::Tainted;
///
/// let raw: String = Tainted::new("Acme".to_string()).into_inner();
/// ```
#[derive(Clone)]
pub struct Tainted<T> {
    // Private: reading requires a Sanitizer.
    inner: T,
}

impl<T> Tainted<T> {
    /// Marks `value` as untrusted input.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Reads the raw value inside this crate.
    ///
    /// Callers are sanitizers, the CSRF check (whose MAC verification is the
    /// validation) and form binding echoing rejected input back to the user.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tainted(<redacted>)")
    }
}
