use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl SQLError {
    /// Whether this error came from a SQL `UNIQUE` constraint.
    pub fn is_unique_violation(&self) -> bool {
        self.to_string().contains("UNIQUE constraint")
    }

    /// Whether this error came from a SQL `FOREIGN KEY` constraint.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.to_string().contains("FOREIGN KEY constraint")
    }
}
