//! Transaction Handlers

pub(crate) mod create;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stampbook_app::domain::transactions::records::StampTransactionRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    /// Transaction identifier, also the idempotency key
    pub uuid: Uuid,

    /// Customer the stamps belong to
    pub customer_uuid: Uuid,

    /// `EARN` or `REDEEM`
    #[serde(rename = "type")]
    pub kind: String,

    /// Number of stamps moved
    pub amount: u32,

    /// Customer's current stamps after this transaction
    pub balance_after: u32,

    pub note: Option<String>,

    /// The date and time the transaction was recorded
    pub created_at: String,
}

impl From<StampTransactionRecord> for TransactionResponse {
    fn from(transaction: StampTransactionRecord) -> Self {
        TransactionResponse {
            uuid: transaction.uuid.into(),
            customer_uuid: transaction.customer_uuid.into(),
            kind: transaction.kind.to_string(),
            amount: transaction.amount,
            balance_after: transaction.balance_after,
            note: transaction.note,
            created_at: transaction.created_at.to_string(),
        }
    }
}
