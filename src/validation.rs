//! Field-level validation primitives shared by the form pages.
//!
//! Each form defines a static `validate()` that walks its fields with these
//! helpers and returns either the validated value or a `FieldErrors` list.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A single failed constraint, keyed by the form field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Ordered list of field errors. At most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one.
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        if self.get(field).is_none() {
            self.0.push(FieldError { field, message });
        }
    }

    /// Record `message` for `field` when `check` is false.
    pub fn require(&mut self, field: &'static str, check: bool, message: &'static str) {
        if !check {
            self.push(field, message);
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(value)` when no errors were recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

// =============================================================================
// CHECKS
// =============================================================================

/// Length in Unicode scalar values, untrimmed.
#[must_use]
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

#[must_use]
pub fn non_empty(value: &str) -> bool {
    !value.is_empty()
}

static EMAIL_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$").ok()
});

/// Address syntax check, ASCII letters only.
///
/// The local part may not start with a dot and no part of the address may
/// contain two consecutive dots.
#[must_use]
pub fn is_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(value))
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
