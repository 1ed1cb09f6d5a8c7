use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Insufficient permissions")]
    Unauthorized,

    #[error("Entity not found")]
    NotFound,

    /// Message meant to be shown to the user next to the form.
    #[error("{0}")]
    Form(String),

    /// A list filter in the query string could not be understood.
    #[error("{0}")]
    Filter(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message)
            | RepositoryError::ConstraintViolation(message) => ServiceError::Form(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => {
                let mut fields = errors
                    .field_errors()
                    .into_keys()
                    .map(|field| field.to_string())
                    .collect::<Vec<_>>();
                fields.sort_unstable();
                ServiceError::Form(format!("Please check the fields: {}", fields.join(", ")))
            }
            other => ServiceError::Form(other.to_string()),
        }
    }
}
