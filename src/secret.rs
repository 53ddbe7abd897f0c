use std::fmt;

use serde::{Deserialize, Deserializer};

/// A configuration value that must never be printed.
///
/// Used for the CSRF signing key. `Debug` and `Display` print `[REDACTED]`,
/// so the key does not leak when the whole [`AppConfig`](crate::AppConfig)
/// is logged.
///
/// # Examples
///
/// ```
/// use customer_guard::Secret;
///
/// let key = Secret::new("signing-key".to_string());
/// assert_eq!(format!("{:?}", key), "[REDACTED]");
/// assert_eq!(key.expose_secret(), "signing-key");
/// ```
// No Clone: copies of the key should be deliberate.
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Returns the wrapped value.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Secret<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Secret::new)
    }
}
