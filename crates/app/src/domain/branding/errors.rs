//! Branding service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrandingServiceError {
    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid {0}")]
    InvalidData(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BrandingServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::InvalidData("branding")
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
