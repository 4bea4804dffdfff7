//! Programs service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgramsServiceError {
    #[error("loyalty program not configured")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid {0}")]
    InvalidData(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProgramsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::InvalidData("program")
            }
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
