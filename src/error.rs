use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ReunionError {
    #[error("reunion not found: {id}")]
    NotFound { id: String },

    #[error("reunion is discarded: {id}")]
    Discarded { id: String },

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid persisted reunion data: {0}")]
    InvalidData(String),
}

impl ReunionError {
    pub fn not_found(id: impl ToString) -> Self {
        ReunionError::NotFound { id: id.to_string() }
    }

    pub fn discarded(id: impl ToString) -> Self {
        ReunionError::Discarded { id: id.to_string() }
    }
}

impl From<ValidationErrors> for ReunionError {
    fn from(errors: ValidationErrors) -> Self {
        ReunionError::Validation(errors)
    }
}

pub type ReunionResult<T> = Result<T, ReunionError>;
