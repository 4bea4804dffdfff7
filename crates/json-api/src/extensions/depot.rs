//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use stampbook_app::domain::tenants::records::TenantUuid;

const TENANT_UUID_DEPOT_KEY: &str = "tenant_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the tenant resolved from the bearer token.
    fn insert_tenant_uuid(&mut self, tenant: TenantUuid);

    /// Tenant of the authenticated caller, or 401 when none was resolved.
    fn tenant_uuid_or_401(&self) -> Result<TenantUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_tenant_uuid(&mut self, tenant: TenantUuid) {
        self.insert(TENANT_UUID_DEPOT_KEY, tenant);
    }

    fn tenant_uuid_or_401(&self) -> Result<TenantUuid, StatusError> {
        self.get::<TenantUuid>(TENANT_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }
}
