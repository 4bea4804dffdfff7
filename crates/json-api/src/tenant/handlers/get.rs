//! Get Current Tenant Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stampbook_app::domain::tenants::records::TenantRecord;

use crate::{extensions::*, state::State, tenant::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantResponse {
    pub uuid: Uuid,

    pub name: String,

    /// Public identifier used in customer-facing URLs
    pub slug: String,

    /// `active` or `suspended`
    pub status: String,

    pub created_at: String,
}

impl From<TenantRecord> for TenantResponse {
    fn from(tenant: TenantRecord) -> Self {
        TenantResponse {
            uuid: tenant.uuid.into(),
            name: tenant.name,
            slug: tenant.slug,
            status: tenant.status.to_string(),
            created_at: tenant.created_at.to_string(),
        }
    }
}

/// Get Current Tenant Handler
///
/// Returns the profile of the tenant the API token belongs to.
#[endpoint(
    tags("tenant"),
    summary = "Get Current Tenant",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TenantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let tenant = state
        .app
        .tenants
        .get_tenant(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenant.into()))
}
