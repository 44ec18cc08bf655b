//! Declarative validation of registration credentials.

use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::Credentials;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A single rule failure reported by a `UserValidator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Violation {
    /// Field the rule applies to
    #[schema(example = "email")]
    pub field: String,
    /// Human readable failure
    #[schema(example = "This value is not a valid email address.")]
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validator seam for registration credentials.
///
/// An empty result means the credentials passed every rule.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UserValidator: Send + Sync {
    fn validate(&self, credentials: &Credentials) -> Vec<Violation>;
}

/// Runs the `#[validate(...)]` rules declared on `Credentials`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    pub fn new() -> Self {
        Self
    }
}

impl UserValidator for ConstraintValidator {
    fn validate(&self, credentials: &Credentials) -> Vec<Violation> {
        match credentials.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => violations_from(&errors),
        }
    }
}

/// Flatten validator errors into violations, ordered by field name.
fn violations_from(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                Violation::new(field.to_string(), message)
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}
