use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client supplied a missing or malformed field; the payload is the user-facing message.
    #[error("validation error: {0}")]
    Validation(String),
    /// Carries the graph name that was looked up.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage read error: {0}")]
    StorageRead(String),
    #[error("storage write error: {0}")]
    StorageWrite(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ServiceError {
    pub fn not_found(name: &str) -> Self { Self::NotFound(name.to_string()) }

    pub fn read(e: impl std::fmt::Display) -> Self { Self::StorageRead(e.to_string()) }

    pub fn write(e: impl std::fmt::Display) -> Self { Self::StorageWrite(e.to_string()) }
}
