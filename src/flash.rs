//! One-shot notices shown on the next rendered page.

use std::fmt;

/// Category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashCategory {
    /// The action completed
    Success,
    /// The action was refused or failed
    Error,
}

impl fmt::Display for FlashCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashCategory::Success => write!(f, "success"),
            FlashCategory::Error => write!(f, "error"),
        }
    }
}

/// A single flash message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Category, used by templates to pick a style
    pub category: FlashCategory,
    /// Localized text
    pub message: String,
}

/// Sink for flash messages.
pub trait FlashBag {
    /// Queues `message` under `category`.
    fn add(&mut self, category: FlashCategory, message: &str);
}

/// In-memory flash bag, typically stored in the user session.
///
/// # Examples
///
/// ```
/// use customer_guard::{FlashBag, FlashCategory, SessionFlashBag};
///
/// let mut flashes = SessionFlashBag::new();
/// flashes.add(FlashCategory::Success, "Customer created");
///
/// assert_eq!(flashes.peek(FlashCategory::Success), vec!["Customer created"]);
/// assert_eq!(flashes.take().len(), 1);
/// assert!(flashes.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct SessionFlashBag {
    entries: Vec<Flash>,
}

impl SessionFlashBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages of one category without removing them.
    pub fn peek(&self, category: FlashCategory) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|flash| flash.category == category)
            .map(|flash| flash.message.as_str())
            .collect()
    }

    /// Returns every queued message in insertion order.
    pub fn all(&self) -> &[Flash] {
        &self.entries
    }

    /// Removes and returns every queued message.
    pub fn take(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.entries)
    }

    /// Returns the number of queued messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FlashBag for SessionFlashBag {
    fn add(&mut self, category: FlashCategory, message: &str) {
        self.entries.push(Flash {
            category,
            message: message.to_string(),
        });
    }
}
