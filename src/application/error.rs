// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Business-rule guard: publish was requested with nothing approved.
    #[error("no approved changes to publish")]
    NoChangesToPublish,

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

/// Flat classification used by callers that need to render an accurate
/// message without matching nested domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    NoChangesToPublish,
    PersistenceFailure,
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(DomainError::Validation(_)) | Self::Validation(_) => ErrorKind::Validation,
            Self::Domain(DomainError::NotFound(_)) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::Domain(DomainError::Conflict(_)) | Self::Conflict(_) => ErrorKind::Conflict,
            Self::Domain(DomainError::Persistence(_)) | Self::Infrastructure(_) => {
                ErrorKind::PersistenceFailure
            }
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NoChangesToPublish => ErrorKind::NoChangesToPublish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_kind() {
        let err: ApplicationError = DomainError::Persistence("disk full".into()).into();
        assert_eq!(err.kind(), ErrorKind::PersistenceFailure);
        let err: ApplicationError = DomainError::NotFound("v-1".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(ApplicationError::NoChangesToPublish.kind(), ErrorKind::NoChangesToPublish);
    }
}
