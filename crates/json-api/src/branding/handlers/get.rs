//! Get Branding Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    branding::{BrandingResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Get Branding Handler
///
/// Returns the tenant's theme, or the defaults when none has been saved.
#[endpoint(
    tags("branding"),
    summary = "Get Branding",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BrandingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let branding = state
        .app
        .branding
        .get_branding(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(branding.into()))
}
