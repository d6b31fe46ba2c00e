use crate::model::RecordKind;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontdeskError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: u32 },

    #[error("Invalid input:\n{0}")]
    Validation(ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FrontdeskError {
    pub fn not_found(kind: RecordKind, id: u32) -> Self {
        FrontdeskError::NotFound { kind, id }
    }
}

impl From<ValidationErrors> for FrontdeskError {
    fn from(errors: ValidationErrors) -> Self {
        FrontdeskError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, FrontdeskError>;
