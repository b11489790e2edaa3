//! Validators and normalizers applied to raw extraction candidates
//!
//! Each extractor funnels its candidates through these checks before they
//! reach the result:
//! - Email syntax, length and false-positive filtering
//! - Phone digit-count, year-prefix and placeholder filtering
//! - Order-preserving de-duplication

mod email;
mod phone;

pub use email::{is_false_positive_email, is_valid_email, normalize_email, EMAIL_SCAN};
pub use phone::{digits_only, is_placeholder_phone, is_valid_phone, normalize_tel_href};

use std::collections::HashSet;

/// An insertion-ordered set of strings
///
/// Values are kept in first-seen order; a value equal to one already held
/// under the same key is dropped. Each extraction pass owns its own list.
#[derive(Debug, Default, Clone)]
pub struct UniqueList {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl UniqueList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value keyed by itself
    ///
    /// Returns true if the value was new.
    pub fn insert(&mut self, value: String) -> bool {
        let key = value.clone();
        self.insert_keyed(key, value)
    }

    /// Inserts a value under an explicit de-duplication key
    ///
    /// Returns true if the key was new.
    pub fn insert_keyed(&mut self, key: String, value: String) -> bool {
        if self.seen.insert(key) {
            self.items.push(value);
            true
        } else {
            false
        }
    }

    /// Returns true if the key has been seen
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Consumes the list, returning values in insertion order
    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}
