/// A value that passed a [`Sanitizer`](crate::Sanitizer).
///
/// Only sanitizers inside this crate construct `Verified<T>`, so holding one
/// is evidence the value went through validation. Form binding writes
/// customer fields exclusively from `Verified<String>`.
///
/// ```compile_fail
/// use customer_guard::Verified;
///
/// let forged = Verified::new_unchecked("Acme".to_string());
/// ```
///
/// ```compile_fail
/// use customer_guard::Verified;
///
/// let forged = Verified { inner: "Acme".to_string() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the wrapper and returns the validated value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
