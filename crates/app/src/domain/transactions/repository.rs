//! Stamp Ledger Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    customers::{
        records::{CustomerRecord, CustomerUuid},
        repository::try_get_stamps,
    },
    transactions::records::{
        StampTransactionKind, StampTransactionRecord, StampTransactionUuid,
    },
};

const EARN_STAMPS_SQL: &str = include_str!("sql/earn_stamps.sql");
const REDEEM_STAMPS_SQL: &str = include_str!("sql/redeem_stamps.sql");
const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");

/// Audit row values, resolved after the balance has been changed.
#[derive(Debug)]
pub(crate) struct LedgerEntry<'a> {
    pub uuid: StampTransactionUuid,
    pub customer_uuid: CustomerUuid,
    pub kind: StampTransactionKind,
    pub amount: i32,
    pub balance_after: u32,
    pub note: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Credit `amount` to both balances. `None` when the customer does not exist
    /// or the total would leave the stamp column range.
    pub(crate) async fn earn_stamps(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        amount: i32,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(EARN_STAMPS_SQL)
            .bind(customer.into_uuid())
            .bind(amount)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Debit `amount` from the current balance when it covers it. `None` when
    /// the customer does not exist or holds too few stamps.
    pub(crate) async fn redeem_stamps(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        amount: i32,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(REDEEM_STAMPS_SQL)
            .bind(customer.into_uuid())
            .bind(amount)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: LedgerEntry<'_>,
    ) -> Result<StampTransactionRecord, sqlx::Error> {
        let balance_after = i32::try_from(entry.balance_after).map_err(|e| {
            sqlx::Error::Encode(Box::new(e))
        })?;

        query_as::<Postgres, StampTransactionRecord>(CREATE_TRANSACTION_SQL)
            .bind(entry.uuid.into_uuid())
            .bind(entry.customer_uuid.into_uuid())
            .bind(entry.kind.as_str())
            .bind(entry.amount)
            .bind(balance_after)
            .bind(entry.note)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<StampTransactionRecord>, sqlx::Error> {
        query_as::<Postgres, StampTransactionRecord>(LIST_TRANSACTIONS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StampTransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: StampTransactionUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            kind: kind
                .parse::<StampTransactionKind>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "kind".to_string(),
                    source: Box::new(e),
                })?,
            amount: try_get_stamps(row, "amount")?,
            balance_after: try_get_stamps(row, "balance_after")?,
            note: row.try_get("note")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
