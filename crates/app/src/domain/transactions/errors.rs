//! Transactions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    #[error("stamp amount must be a positive integer")]
    InvalidAmount,

    #[error("insufficient stamps: {available} available, {requested} requested")]
    InsufficientStamps { available: u32, requested: u32 },

    #[error("stamp limit exceeded: {total} stamps held, {requested} requested")]
    StampLimitExceeded { total: u32, requested: u32 },

    #[error("customer not found")]
    CustomerNotFound,

    #[error("transaction already recorded")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TransactionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::CustomerNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidAmount,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
