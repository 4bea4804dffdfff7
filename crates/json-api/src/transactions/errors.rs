//! Transaction Errors

use salvo::http::StatusError;
use tracing::error;

use stampbook_app::domain::transactions::TransactionsServiceError;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Amount must be a positive integer")
        }
        TransactionsServiceError::InsufficientStamps {
            available,
            requested,
        } => StatusError::unprocessable_entity().brief(format!(
            "Insufficient stamps: {available} available, {requested} requested"
        )),
        TransactionsServiceError::StampLimitExceeded { total, requested } => {
            StatusError::unprocessable_entity().brief(format!(
                "Stamp limit exceeded: {total} held, {requested} requested"
            ))
        }
        TransactionsServiceError::CustomerNotFound => {
            StatusError::not_found().brief("Customer not found")
        }
        TransactionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Transaction already recorded")
        }
        TransactionsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid transaction payload")
        }
        TransactionsServiceError::Sql(source) => {
            error!("stamp ledger storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
