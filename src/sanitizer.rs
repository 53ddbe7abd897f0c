//! Sanitizers promote [`Tainted`] form input to [`Verified`] values.

use std::fmt;

use crate::{Tainted, Verified};

/// Why a value was rejected by a sanitizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SanitizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SanitizationError {}

/// Categories of sanitization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// Blank after trimming
    Empty,
    /// Longer than the configured maximum
    TooLong,
    /// Contains control characters
    ContainsControlChars,
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::TooLong => write!(f, "input too long"),
            Self::ContainsControlChars => write!(f, "contains control characters"),
        }
    }
}

/// Validates untrusted input.
///
/// Implementations either return `Verified<T>` or a [`SanitizationError`];
/// there is no path that yields the raw value unchecked.
pub trait Sanitizer<T> {
    /// Validates `input`, consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizationError`] if the value does not meet the rules.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<T>, SanitizationError>;
}

/// Sanitizer for single-line text fields such as the customer name.
///
/// Trims surrounding whitespace, then rejects blank values, control
/// characters, and values longer than `max_len` characters.
#[derive(Debug, Clone, Copy)]
pub struct StringSanitizer {
    max_len: usize,
}

impl StringSanitizer {
    /// Creates a sanitizer with the given maximum length in characters.
    ///
    /// A limit of zero is raised to one.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
        }
    }

    /// Returns the maximum accepted length in characters.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Sanitizer<String> for StringSanitizer {
    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "value should not be blank",
            ));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ContainsControlChars,
                "value contains control characters",
            ));
        }

        if trimmed.chars().count() > self.max_len {
            return Err(SanitizationError::new(
                SanitizationErrorKind::TooLong,
                format!("value is longer than {} characters", self.max_len),
            ));
        }

        Ok(Verified::new_unchecked(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(max_len: usize, input: &str) -> Result<Verified<String>, SanitizationError> {
        StringSanitizer::new(max_len).sanitize(Tainted::new(input.to_string()))
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let verified = run(255, "  Acme Ltd \t").expect("valid");
        assert_eq!(verified.as_ref(), "Acme Ltd");
    }

    #[test]
    fn rejects_blank() {
        let err = run(255, "   ").unwrap_err();
        assert_eq!(err.kind(), SanitizationErrorKind::Empty);
    }

    #[test]
    fn rejects_control_characters() {
        let err = run(255, "Acme\u{0}Ltd").unwrap_err();
        assert_eq!(err.kind(), SanitizationErrorKind::ContainsControlChars);

        let err = run(255, "Acme\nLtd").unwrap_err();
        assert_eq!(err.kind(), SanitizationErrorKind::ContainsControlChars);
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 7 Cyrillic characters, 14 bytes
        assert!(run(5, "Ромашка").is_err());
        assert!(run(7, "Ромашка").is_ok());

        let err = run(3, "Acme").unwrap_err();
        assert_eq!(err.kind(), SanitizationErrorKind::TooLong);
        assert!(err.message().contains('3'));
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let sanitizer = StringSanitizer::new(0);
        assert_eq!(sanitizer.max_len(), 1);
        assert!(run(0, "A").is_ok());
    }

    #[test]
    fn display_includes_kind() {
        let err = run(255, "").unwrap_err();
        assert_eq!(err.to_string(), "empty input: value should not be blank");
    }
}
