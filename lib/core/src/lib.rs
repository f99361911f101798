pub mod error;
pub mod types;
pub mod validation;

pub use error::ServiceError;
pub use types::{ListParams, ListResult, new_id, now_rfc3339};
pub use validation::{Validate, ValidationError, Violation};
