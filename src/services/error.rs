use thiserror::Error;

use crate::database::DatabaseError;
use crate::forms::FieldConfigError;

/// Errors raised by the template and employee services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed field spec or bad data shape; fixable by the caller
    #[error("{0}")]
    Validation(String),

    /// Template name already taken. Part of the validation family, reported separately
    /// so the boundary can answer 409.
    #[error("{0}")]
    Conflict(String),

    /// Unknown or inactive id
    #[error("{0}")]
    NotFound(String),

    /// Field configuration was not parseable JSON
    #[error("{0}")]
    MalformedInput(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<FieldConfigError> for ServiceError {
    fn from(err: FieldConfigError) -> Self {
        if err.is_malformed() {
            ServiceError::MalformedInput(err.to_string())
        } else {
            ServiceError::Validation(err.to_string())
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_config_errors_split_by_kind() {
        let malformed: ServiceError = FieldConfigError::Malformed("eof".into()).into();
        assert!(matches!(malformed, ServiceError::MalformedInput(_)));

        let shape: ServiceError = FieldConfigError::NotAList.into();
        assert!(matches!(shape, ServiceError::Validation(ref m) if m == "Fields config must be a list"));
    }

    #[test]
    fn conflicts_surface_as_conflict() {
        let err: ServiceError = DatabaseError::Conflict("taken".into()).into();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let err: ServiceError = DatabaseError::QueryError("boom".into()).into();
        assert!(matches!(err, ServiceError::Database(_)));
    }
}
