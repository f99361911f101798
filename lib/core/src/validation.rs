use serde::Serialize;
use thiserror::Error;

// ── Rule tags ───────────────────────────────────────────────────────
//
// Stable identifiers for the kind of rule a violation came from.
// Clients match on these, never on the message text.

pub mod rule {
    pub const REQUIRED: &str = "required";
    pub const RANGE: &str = "range";
    pub const FORMAT: &str = "format";
    pub const CROSS_FIELD: &str = "cross_field";
}

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field name as it appears in the JSON payload.
    pub field: String,

    /// Rule tag (see [`rule`]).
    pub rule: String,

    /// Human-readable description of what failed.
    pub message: String,
}

/// The full outcome of validating one DTO.
///
/// Collects every violation, in declaration order, so a client can correct
/// all fields in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[error("{} validation violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. Order of calls is the order reported.
    pub fn push(&mut self, field: &str, rule: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.to_string(),
            rule: rule.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok(())` if nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Implemented by every entity DTO. Pure: no store access, the input is
/// never mutated, and all violations are collected rather than the first.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn violations_keep_order() {
        let mut err = ValidationError::new();
        err.push("name", rule::REQUIRED, "name must not be empty");
        err.push("stock", rule::RANGE, "stock must be >= 0");
        let err = err.into_result().unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[0].field, "name");
        assert_eq!(err.violations[1].field, "stock");
        assert_eq!(err.violations[1].rule, rule::RANGE);
    }

    #[test]
    fn display_counts_violations() {
        let mut err = ValidationError::new();
        err.push("email", rule::FORMAT, "not an email address");
        assert_eq!(err.to_string(), "1 validation violation(s)");
    }
}
