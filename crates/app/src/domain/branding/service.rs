//! Branding service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        branding::{
            data::BrandingUpdate, errors::BrandingServiceError, records::BrandingRecord,
            repository::PgBrandingRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBrandingService {
    db: Db,
    repository: PgBrandingRepository,
}

impl PgBrandingService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBrandingRepository::new(),
        }
    }
}

#[async_trait]
impl BrandingService for PgBrandingService {
    async fn get_branding(&self, tenant: TenantUuid) -> Result<BrandingRecord, BrandingServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let branding = self.repository.find_branding(&mut tx).await?;

        tx.commit().await?;

        Ok(branding.unwrap_or_default())
    }

    async fn upsert_branding(
        &self,
        tenant: TenantUuid,
        update: BrandingUpdate,
    ) -> Result<BrandingRecord, BrandingServiceError> {
        let branding = update
            .validate()
            .map_err(BrandingServiceError::InvalidData)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let stored = self.repository.upsert_branding(&mut tx, &branding).await?;

        tx.commit().await?;

        Ok(stored)
    }
}

#[automock]
#[async_trait]
pub trait BrandingService: Send + Sync {
    /// Stored branding, or the house defaults when none has been saved.
    async fn get_branding(&self, tenant: TenantUuid) -> Result<BrandingRecord, BrandingServiceError>;

    /// Validate and store the tenant's branding.
    async fn upsert_branding(
        &self,
        tenant: TenantUuid,
        update: BrandingUpdate,
    ) -> Result<BrandingRecord, BrandingServiceError>;
}
