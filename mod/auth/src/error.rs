use thiserror::Error;

use pharmacy_core::ServiceError;

/// Why a bearer token was rejected.
///
/// Verification is a pure function of the token and the process's signing
/// key / issuer / audience configuration; each failure maps to exactly one
/// of these reasons.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Not a parseable token (also covers a missing or non-Bearer header).
    #[error("malformed credential")]
    Malformed,

    #[error("bad token signature")]
    BadSignature,

    #[error("token issuer mismatch")]
    WrongIssuer,

    #[error("token audience mismatch")]
    WrongAudience,

    #[error("token has expired")]
    Expired,
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        ServiceError::Unauthorized(err.to_string())
    }
}

/// Startup configuration errors. Unlike [`AuthError`], these are fatal:
/// no request can ever be verified against a broken configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT signing secret is not set")]
    MissingSecret,

    #[error("JWT signing secret is too short ({got} bytes, need at least {min})")]
    WeakSecret { got: usize, min: usize },

    #[error("policy '{0}' is already registered")]
    DuplicatePolicy(String),
}
