//! Loyalty programs service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        programs::{
            data::ProgramUpdate, errors::ProgramsServiceError, records::LoyaltyProgramRecord,
            repository::PgProgramsRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProgramsService {
    db: Db,
    repository: PgProgramsRepository,
}

impl PgProgramsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProgramsRepository::new(),
        }
    }
}

#[async_trait]
impl ProgramsService for PgProgramsService {
    async fn get_program(
        &self,
        tenant: TenantUuid,
    ) -> Result<LoyaltyProgramRecord, ProgramsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let program = self.repository.find_program(&mut tx).await?;

        tx.commit().await?;

        program.ok_or(ProgramsServiceError::NotFound)
    }

    async fn upsert_program(
        &self,
        tenant: TenantUuid,
        update: ProgramUpdate,
    ) -> Result<LoyaltyProgramRecord, ProgramsServiceError> {
        let threshold = update
            .stored_threshold()
            .ok_or(ProgramsServiceError::InvalidData("reward_threshold"))?;

        let description = update
            .trimmed_description()
            .ok_or(ProgramsServiceError::InvalidData("reward_description"))?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let program = self
            .repository
            .upsert_program(&mut tx, threshold, description)
            .await?;

        tx.commit().await?;

        Ok(program)
    }
}

#[automock]
#[async_trait]
pub trait ProgramsService: Send + Sync {
    /// Loyalty program of the tenant; `NotFound` until one is configured.
    async fn get_program(
        &self,
        tenant: TenantUuid,
    ) -> Result<LoyaltyProgramRecord, ProgramsServiceError>;

    /// Create or replace the tenant's loyalty program.
    async fn upsert_program(
        &self,
        tenant: TenantUuid,
        update: ProgramUpdate,
    ) -> Result<LoyaltyProgramRecord, ProgramsServiceError>;
}
