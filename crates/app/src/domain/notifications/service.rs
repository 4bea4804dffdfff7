//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        notifications::{
            errors::NotificationsServiceError,
            records::{NotificationRecord, NotificationUuid},
            repository::PgNotificationsRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_notifications(
        &self,
        tenant: TenantUuid,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let notifications = self
            .repository
            .list_notifications(&mut tx, unread_only)
            .await?;

        tx.commit().await?;

        Ok(notifications)
    }

    async fn mark_read(
        &self,
        tenant: TenantUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let notification = self.repository.mark_read(&mut tx, notification).await?;

        tx.commit().await?;

        Ok(notification)
    }

    async fn mark_all_read(&self, tenant: TenantUuid) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self.repository.mark_all_read(&mut tx).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Notifications newest first, optionally only those not yet read.
    async fn list_notifications(
        &self,
        tenant: TenantUuid,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    /// Mark one notification read. Already-read notifications keep their
    /// original `read_at`.
    async fn mark_read(
        &self,
        tenant: TenantUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// Mark every unread notification read, returning how many changed.
    async fn mark_all_read(&self, tenant: TenantUuid) -> Result<u64, NotificationsServiceError>;
}
