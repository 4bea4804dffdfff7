//! Stamp Transaction Data

use crate::domain::{
    customers::records::{CustomerRecord, CustomerUuid},
    transactions::records::{StampTransactionKind, StampTransactionRecord, StampTransactionUuid},
};

/// New Stamp Transaction Data
///
/// `uuid` is supplied by the caller and doubles as an idempotency key.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStampTransaction {
    pub uuid: StampTransactionUuid,
    pub customer_uuid: CustomerUuid,
    pub kind: StampTransactionKind,
    pub amount: u32,
    pub note: Option<String>,
}

impl NewStampTransaction {
    /// Amount as stored, or `None` when it is zero or out of range.
    pub(crate) fn stored_amount(&self) -> Option<i32> {
        i32::try_from(self.amount).ok().filter(|amount| *amount > 0)
    }

    pub(crate) fn trimmed_note(&self) -> Option<&str> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }
}

/// Result of applying a stamp transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOutcome {
    pub transaction: StampTransactionRecord,
    pub customer: CustomerRecord,
    pub reward_unlocked: bool,
}

/// Whether moving from `before` to `after` current stamps crosses `threshold`.
#[must_use]
pub fn crosses_threshold(before: u32, after: u32, threshold: u32) -> bool {
    before < threshold && after >= threshold
}
