use thiserror::Error;
use validator::ValidationErrors;

use crate::ai::ProviderError;
use crate::domain::recipe::RecipeParseError;
use crate::forms::upload::CatalogUploadError;
use crate::repository::RepositoryError;

/// Failures surfaced to callers of the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Uploaded rows or generated line items are missing required fields.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The text-generation backend failed; reported verbatim.
    #[error("AI provider error: {0}")]
    Provider(#[from] ProviderError),
    /// The backend answered with text that is not a recipe document.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Validation(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<RecipeParseError> for ServiceError {
    fn from(err: RecipeParseError) -> Self {
        if err.is_malformed() {
            ServiceError::MalformedResponse(err.to_string())
        } else {
            ServiceError::Validation(err.to_string())
        }
    }
}

impl From<CatalogUploadError> for ServiceError {
    fn from(err: CatalogUploadError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
