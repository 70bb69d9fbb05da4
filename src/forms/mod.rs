//! Form pages: field state, static validation, and submit workflows.
//!
//! Every workflow follows the same shape: validate synchronously, issue at
//! most one backend call, turn the outcome into a toast, and reset the
//! fields only on success.

pub mod employee;
pub mod signin;

use crate::validation::FieldErrors;

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validation failed; nothing was sent.
    Blocked(FieldErrors),
    /// The backend accepted the submission and the form was reset.
    Accepted,
    /// The backend answered with a refusal; the form keeps its values.
    Rejected,
    /// The call itself failed; the form keeps its values.
    Failed,
}

impl Submission {
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Blocked(errors) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
