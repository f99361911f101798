//! Field-level rule helpers shared by the DTO `Validate` impls.
//!
//! All helpers append to the passed collector and never short-circuit, so
//! a DTO violating N independent rules reports all N violations. Format
//! checks skip empty values — emptiness is the `required` rule's job.

use once_cell::sync::Lazy;
use regex::Regex;

use pharmacy_core::ValidationError;
use pharmacy_core::validation::rule;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]{3,32}$").unwrap());

/// Two uppercase letters, a dash, 4-6 digits (e.g. `MD-12345`).
static LICENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}-[0-9]{4,6}$").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]{7,20}$").unwrap());

/// Non-empty check. Returns whether the value was present.
pub fn require(err: &mut ValidationError, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        err.push(field, rule::REQUIRED, format!("{} must not be empty", field));
        return false;
    }
    true
}

pub fn check_email(err: &mut ValidationError, field: &str, value: &str) {
    if !value.is_empty() && !EMAIL_RE.is_match(value) {
        err.push(field, rule::FORMAT, format!("{} is not a valid email address", field));
    }
}

pub fn check_username(err: &mut ValidationError, field: &str, value: &str) {
    if !value.is_empty() && !USERNAME_RE.is_match(value) {
        err.push(
            field,
            rule::FORMAT,
            format!("{} must be 3-32 lowercase letters, digits or underscores", field),
        );
    }
}

pub fn check_license_number(err: &mut ValidationError, field: &str, value: &str) {
    if !value.is_empty() && !LICENSE_RE.is_match(value) {
        err.push(
            field,
            rule::FORMAT,
            format!("{} must look like XX-00000 (two letters, 4-6 digits)", field),
        );
    }
}

pub fn check_phone(err: &mut ValidationError, field: &str, value: &str) {
    if !value.is_empty() && !PHONE_RE.is_match(value) {
        err.push(field, rule::FORMAT, format!("{} is not a valid phone number", field));
    }
}

/// RFC 3339 timestamp check. Returns whether the value parsed.
pub fn check_rfc3339(err: &mut ValidationError, field: &str, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if chrono::DateTime::parse_from_rfc3339(value).is_err() {
        err.push(field, rule::FORMAT, format!("{} must be an RFC 3339 timestamp", field));
        return false;
    }
    true
}

pub fn check_min_i64(err: &mut ValidationError, field: &str, value: i64, min: i64) {
    if value < min {
        err.push(field, rule::RANGE, format!("{} must be >= {}", field, min));
    }
}

pub fn check_positive_f64(err: &mut ValidationError, field: &str, value: f64) {
    if !(value > 0.0) {
        err.push(field, rule::RANGE, format!("{} must be > 0", field));
    }
}

pub fn check_non_negative_f64(err: &mut ValidationError, field: &str, value: f64) {
    if !(value >= 0.0) {
        err.push(field, rule::RANGE, format!("{} must be >= 0", field));
    }
}

pub fn check_min_len(err: &mut ValidationError, field: &str, value: &str, min: usize) {
    if !value.is_empty() && value.chars().count() < min {
        err.push(field, rule::RANGE, format!("{} must be at least {} characters", field, min));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_empty_and_blank() {
        let mut err = ValidationError::new();
        assert!(!require(&mut err, "name", ""));
        assert!(!require(&mut err, "name", "   "));
        assert!(require(&mut err, "name", "aspirin"));
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn email_format() {
        let mut err = ValidationError::new();
        check_email(&mut err, "email", "alice@example.com");
        assert!(err.is_empty());
        check_email(&mut err, "email", "not-an-email");
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, rule::FORMAT);
    }

    #[test]
    fn empty_value_skips_format_checks() {
        // Emptiness is the `required` rule's concern; no double-report.
        let mut err = ValidationError::new();
        check_email(&mut err, "email", "");
        check_license_number(&mut err, "licenseNumber", "");
        assert!(err.is_empty());
    }

    #[test]
    fn license_number_format() {
        let mut err = ValidationError::new();
        check_license_number(&mut err, "licenseNumber", "MD-12345");
        assert!(err.is_empty());
        check_license_number(&mut err, "licenseNumber", "md-12345");
        check_license_number(&mut err, "licenseNumber", "MD-123");
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn rfc3339_check() {
        let mut err = ValidationError::new();
        assert!(check_rfc3339(&mut err, "periodStart", "2026-01-01T00:00:00Z"));
        assert!(!check_rfc3339(&mut err, "periodStart", "January 1st"));
        assert_eq!(err.violations.len(), 1);
    }

    #[test]
    fn nan_price_is_out_of_range() {
        let mut err = ValidationError::new();
        check_positive_f64(&mut err, "price", f64::NAN);
        assert_eq!(err.violations.len(), 1);
    }
}
