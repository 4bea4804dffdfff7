//! Stamp ledger service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        customers::{
            records::{CustomerRecord, CustomerUuid},
            repository::PgCustomersRepository,
        },
        notifications::{data::NewNotification, repository::PgNotificationsRepository},
        programs::repository::PgProgramsRepository,
        tenants::records::TenantUuid,
        transactions::{
            data::{NewStampTransaction, TransactionOutcome, crosses_threshold},
            errors::TransactionsServiceError,
            records::{StampTransactionKind, StampTransactionRecord},
            repository::{LedgerEntry, PgTransactionsRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
    customers_repository: PgCustomersRepository,
    programs_repository: PgProgramsRepository,
    notifications_repository: PgNotificationsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
            customers_repository: PgCustomersRepository::new(),
            programs_repository: PgProgramsRepository::new(),
            notifications_repository: PgNotificationsRepository::new(),
        }
    }

    /// Apply the balance change. The balance guard lives in the `UPDATE`, so
    /// concurrent redemptions serialise on the customer row.
    async fn apply_balance_change(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: &NewStampTransaction,
        amount: i32,
    ) -> Result<CustomerRecord, TransactionsServiceError> {
        let customer = transaction.customer_uuid;

        let updated = match transaction.kind {
            StampTransactionKind::Earn => {
                self.repository.earn_stamps(tx, customer, amount).await?
            }
            StampTransactionKind::Redeem => {
                self.repository.redeem_stamps(tx, customer, amount).await?
            }
        };

        if let Some(updated) = updated {
            return Ok(updated);
        }

        let existing = self.customers_repository.get_customer(tx, customer).await?;

        Err(match transaction.kind {
            StampTransactionKind::Earn => TransactionsServiceError::StampLimitExceeded {
                total: existing.total_stamps,
                requested: transaction.amount,
            },
            StampTransactionKind::Redeem => TransactionsServiceError::InsufficientStamps {
                available: existing.current_stamps,
                requested: transaction.amount,
            },
        })
    }

    async fn notify_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: StampTransactionKind,
        customer: &CustomerRecord,
        amount: u32,
    ) -> Result<bool, sqlx::Error> {
        let notification = match kind {
            StampTransactionKind::Earn => {
                NewNotification::stamps_earned(customer.uuid, &customer.name, amount)
            }
            StampTransactionKind::Redeem => {
                NewNotification::stamps_redeemed(customer.uuid, &customer.name, amount)
            }
        };

        self.notifications_repository
            .create_notification(tx, &notification)
            .await?;

        if kind != StampTransactionKind::Earn {
            return Ok(false);
        }

        let Some(program) = self.programs_repository.find_program(tx).await? else {
            return Ok(false);
        };

        let before = customer.current_stamps.saturating_sub(amount);

        if !crosses_threshold(before, customer.current_stamps, program.reward_threshold) {
            return Ok(false);
        }

        self.notifications_repository
            .create_notification(
                tx,
                &NewNotification::reward_unlocked(
                    customer.uuid,
                    &customer.name,
                    &program.reward_description,
                ),
            )
            .await?;

        Ok(true)
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn record_transaction(
        &self,
        tenant: TenantUuid,
        transaction: NewStampTransaction,
    ) -> Result<TransactionOutcome, TransactionsServiceError> {
        let amount = transaction
            .stored_amount()
            .ok_or(TransactionsServiceError::InvalidAmount)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let customer = self
            .apply_balance_change(&mut tx, &transaction, amount)
            .await?;

        let recorded = self
            .repository
            .create_transaction(
                &mut tx,
                LedgerEntry {
                    uuid: transaction.uuid,
                    customer_uuid: transaction.customer_uuid,
                    kind: transaction.kind,
                    amount,
                    balance_after: customer.current_stamps,
                    note: transaction.trimmed_note(),
                },
            )
            .await?;

        let reward_unlocked = self
            .notify_owner(&mut tx, transaction.kind, &customer, transaction.amount)
            .await?;

        tx.commit().await?;

        debug!(
            %tenant,
            customer = %customer.uuid,
            transaction = %recorded.uuid,
            kind = %recorded.kind,
            amount = recorded.amount,
            balance_after = recorded.balance_after,
            "recorded stamp transaction"
        );

        if reward_unlocked {
            info!(%tenant, customer = %customer.uuid, "customer unlocked a reward");
        }

        Ok(TransactionOutcome {
            transaction: recorded,
            customer,
            reward_unlocked,
        })
    }

    async fn list_transactions(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Vec<StampTransactionRecord>, TransactionsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        self.customers_repository
            .get_customer(&mut tx, customer)
            .await?;

        let transactions = self.repository.list_transactions(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(transactions)
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Earn or redeem stamps for a customer, writing the audit row and owner
    /// notifications in the same database transaction.
    async fn record_transaction(
        &self,
        tenant: TenantUuid,
        transaction: NewStampTransaction,
    ) -> Result<TransactionOutcome, TransactionsServiceError>;

    /// Ledger of a customer, newest first.
    async fn list_transactions(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<Vec<StampTransactionRecord>, TransactionsServiceError>;
}
