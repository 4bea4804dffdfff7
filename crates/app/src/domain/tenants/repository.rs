//! Tenants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    tenants::{
        data::NewTenant,
        records::{TenantRecord, TenantStatus, TenantUuid},
    },
    users::records::UserUuid,
};

const CREATE_TENANT_SQL: &str = include_str!("sql/create_tenant.sql");
const GET_TENANT_SQL: &str = include_str!("sql/get_tenant.sql");
const FIND_TENANT_BY_SLUG_SQL: &str = include_str!("sql/find_tenant_by_slug.sql");
const LIST_TENANTS_SQL: &str = include_str!("sql/list_tenants.sql");
const LIST_OWNER_TENANTS_SQL: &str = include_str!("sql/list_owner_tenants.sql");
const SET_TENANT_STATUS_SQL: &str = include_str!("sql/set_tenant_status.sql");
const SET_TENANTS_STATUS_SQL: &str = include_str!("sql/set_tenants_status.sql");
const DELETE_TENANT_SQL: &str = include_str!("sql/delete_tenant.sql");

#[derive(Debug, Clone, Default)]
/// PostgreSQL-backed tenants repository.
pub(crate) struct PgTenantsRepository;

impl PgTenantsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: &NewTenant,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(CREATE_TENANT_SQL)
            .bind(tenant.uuid.into_uuid())
            .bind(tenant.owner_uuid.into_uuid())
            .bind(tenant.name.trim())
            .bind(&tenant.slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(GET_TENANT_SQL)
            .bind(tenant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_tenant_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(FIND_TENANT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_tenants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(LIST_TENANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Lists an owner's tenants, locking the rows for the rest of the transaction.
    pub(crate) async fn list_owner_tenants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(LIST_OWNER_TENANTS_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_tenant_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        status: TenantStatus,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(SET_TENANT_STATUS_SQL)
            .bind(tenant.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_tenants_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenants: &[TenantUuid],
        status: TenantStatus,
    ) -> Result<u64, sqlx::Error> {
        if tenants.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<Uuid> = tenants.iter().copied().map(TenantUuid::into_uuid).collect();

        let rows_affected = query(SET_TENANTS_STATUS_SQL)
            .bind(uuids)
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
    ) -> Result<Option<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(DELETE_TENANT_SQL)
            .bind(tenant.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<TenantStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: TenantUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
