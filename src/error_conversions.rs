//! Error conversion glue between the value-object layer and the API client
//! and service error types.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here and are only compiled with the `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

/// Raised when the backend returns a record that violates a domain invariant.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(format!("Invalid data returned by the API: {val}"))
    }
}
