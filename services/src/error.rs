use sea_orm::DbErr;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
///
/// The first three variants are the attendance engine's own taxonomy; the
/// rest cover registration, enrollment and request handling.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Student, session, token or other referenced row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Operation is not allowed in the target's current lifecycle state.
    #[error("{0}")]
    InvalidState(String),

    /// Student's section/year does not match the session's cohort.
    #[error("{0}")]
    Eligibility(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(common::format_validation_errors(&errors))
    }
}
