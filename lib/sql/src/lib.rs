pub mod error;
pub mod sqlite;
pub mod store;

pub use error::SQLError;
pub use sqlite::SqliteStore;
pub use store::{Row, SQLStore, Value};
