//! Public Tenant Page Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stampbook_app::domain::{programs::ProgramsServiceError, tenants::records::TenantStatus};

use crate::{
    branding::{BrandingResponse, into_status_error as branding_status_error},
    extensions::*,
    program::{ProgramResponse, into_status_error as program_status_error},
    state::State,
    tenant::into_status_error as tenant_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublicTenantResponse {
    pub name: String,

    pub slug: String,

    pub branding: BrandingResponse,

    /// Absent until the tenant configures a loyalty program
    pub program: Option<ProgramResponse>,
}

/// Public Tenant Page Handler
///
/// Branding and loyalty program of an active tenant, for customer-facing
/// pages. Suspended and deleted tenants are reported as not found.
#[endpoint(
    tags("public"),
    summary = "Get Public Tenant Page",
    responses(
        (status_code = StatusCode::OK, description = "Tenant page"),
        (status_code = StatusCode::NOT_FOUND, description = "Tenant not found"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PublicTenantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tenant = state
        .app
        .tenants
        .find_tenant_by_slug(&slug.into_inner())
        .await
        .map_err(tenant_status_error)?;

    if tenant.status != TenantStatus::Active {
        return Err(StatusError::not_found().brief("Tenant not found"));
    }

    let branding = state
        .app
        .branding
        .get_branding(tenant.uuid)
        .await
        .map_err(branding_status_error)?;

    let program = match state.app.programs.get_program(tenant.uuid).await {
        Ok(program) => Some(program.into()),
        Err(ProgramsServiceError::NotFound) => None,
        Err(error) => return Err(program_status_error(error)),
    };

    Ok(Json(PublicTenantResponse {
        name: tenant.name,
        slug: tenant.slug,
        branding: branding.into(),
        program,
    }))
}
