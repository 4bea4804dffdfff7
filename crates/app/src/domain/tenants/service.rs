//! Tenants service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::domain::{
    tenants::{
        data::{NewTenant, is_valid_slug},
        errors::TenantsServiceError,
        records::{TenantRecord, TenantStatus, TenantUuid},
        repository::PgTenantsRepository,
        suspension::{TenantStatusChanges, plan_tenant_statuses},
    },
    users::{records::UserUuid, repository::PgUsersRepository},
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    pool: PgPool,
    repository: PgTenantsRepository,
    users_repository: PgUsersRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgTenantsRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }
}

/// Bring an owner's tenant statuses in line with their plan inside `tx`.
///
/// The owner row is locked first so concurrent syncs for one owner serialise.
pub(crate) async fn sync_owner_tenants(
    tx: &mut Transaction<'_, Postgres>,
    users: &PgUsersRepository,
    tenants: &PgTenantsRepository,
    owner: UserUuid,
) -> Result<TenantStatusChanges, sqlx::Error> {
    let user = users.lock_user(tx, owner).await?;
    let owned = tenants.list_owner_tenants(tx, owner).await?;

    let changes = plan_tenant_statuses(&owned, user.plan.max_active_tenants());

    tenants
        .set_tenants_status(tx, &changes.activated, TenantStatus::Active)
        .await?;

    tenants
        .set_tenants_status(tx, &changes.suspended, TenantStatus::Suspended)
        .await?;

    if !changes.is_empty() {
        info!(
            owner_uuid = %owner,
            plan = %user.plan,
            activated = changes.activated.len(),
            suspended = changes.suspended.len(),
            "synced tenant statuses with plan"
        );
    }

    Ok(changes)
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        if !is_valid_slug(&tenant.slug) {
            return Err(TenantsServiceError::InvalidSlug(tenant.slug));
        }

        let mut tx = self.pool.begin().await?;

        self.users_repository
            .lock_user(&mut tx, tenant.owner_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => TenantsServiceError::InvalidReference,
                other => other.into(),
            })?;

        let created = self.repository.create_tenant(&mut tx, &tenant).await?;

        sync_owner_tenants(
            &mut tx,
            &self.users_repository,
            &self.repository,
            tenant.owner_uuid,
        )
        .await?;

        let created = self.repository.get_tenant(&mut tx, created.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_tenant(&self, tenant: TenantUuid) -> Result<TenantRecord, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let tenant = self.repository.get_tenant(&mut tx, tenant).await?;

        tx.commit().await?;

        Ok(tenant)
    }

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<TenantRecord, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let tenant = self.repository.find_tenant_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(tenant)
    }

    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let tenants = self.repository.list_tenants(&mut tx).await?;

        tx.commit().await?;

        Ok(tenants)
    }

    async fn list_owner_tenants(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<TenantRecord>, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let tenants = self.repository.list_owner_tenants(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(tenants)
    }

    async fn set_tenant_status(
        &self,
        tenant: TenantUuid,
        status: TenantStatus,
    ) -> Result<TenantRecord, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let updated = self
            .repository
            .set_tenant_status(&mut tx, tenant, status)
            .await?;

        tx.commit().await?;

        info!(tenant_uuid = %tenant, %status, "tenant status overridden");

        Ok(updated)
    }

    async fn delete_tenant(
        &self,
        tenant: TenantUuid,
    ) -> Result<TenantStatusChanges, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let deleted = self
            .repository
            .delete_tenant(&mut tx, tenant)
            .await?
            .ok_or(TenantsServiceError::NotFound)?;

        let changes = sync_owner_tenants(
            &mut tx,
            &self.users_repository,
            &self.repository,
            deleted.owner_uuid,
        )
        .await?;

        tx.commit().await?;

        Ok(changes)
    }

    async fn sync_user_tenants(
        &self,
        owner: UserUuid,
    ) -> Result<TenantStatusChanges, TenantsServiceError> {
        let mut tx = self.pool.begin().await?;

        let changes =
            sync_owner_tenants(&mut tx, &self.users_repository, &self.repository, owner).await?;

        tx.commit().await?;

        Ok(changes)
    }
}

#[automock]
#[async_trait]
/// Tenant persistence and plan-enforcement operations.
pub trait TenantsService: Send + Sync {
    /// Creates a new tenant; it starts suspended when the owner's plan is full.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;

    /// Retrieve a single tenant.
    async fn get_tenant(&self, tenant: TenantUuid) -> Result<TenantRecord, TenantsServiceError>;

    /// Retrieve a tenant by its public slug.
    async fn find_tenant_by_slug(&self, slug: &str) -> Result<TenantRecord, TenantsServiceError>;

    /// Lists every tenant across all owners.
    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError>;

    /// Lists one owner's tenants, oldest first.
    async fn list_owner_tenants(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<TenantRecord>, TenantsServiceError>;

    /// Overrides a tenant's status until the next plan sync.
    async fn set_tenant_status(
        &self,
        tenant: TenantUuid,
        status: TenantStatus,
    ) -> Result<TenantRecord, TenantsServiceError>;

    /// Soft-deletes a tenant and re-syncs the owner's remaining tenants.
    async fn delete_tenant(
        &self,
        tenant: TenantUuid,
    ) -> Result<TenantStatusChanges, TenantsServiceError>;

    /// Recomputes active/suspended status for an owner's tenants.
    async fn sync_user_tenants(
        &self,
        owner: UserUuid,
    ) -> Result<TenantStatusChanges, TenantsServiceError>;
}
