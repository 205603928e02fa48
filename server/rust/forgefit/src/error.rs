use forgefit_kvstore::StoreError;
use forgefit_pagination::PaginationError;
use forgefit_validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("default column cannot be changed: {0}")]
    Protected(String),
    #[error("invalid credentials")]
    Rejected,
    #[error("plan not found: {0}")]
    PlanNotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<PaginationError> for ServiceError {
    fn from(e: PaginationError) -> Self {
        ServiceError::InvalidInput(e.to_string())
    }
}
