//! Update Branding Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stampbook_app::domain::branding::{data::BrandingUpdate, records::FontFamily};

use crate::{
    branding::{BrandingResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Branding Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateBrandingRequest {
    /// `#rrggbb`, case-insensitive
    pub primary_color: String,

    /// `#rrggbb`, case-insensitive
    pub secondary_color: String,

    /// `http(s)://` URL; blank or omitted removes the logo
    #[serde(default)]
    pub logo_url: Option<String>,

    /// One of `inter`, `roboto`, `lato`, `montserrat`, `poppins`, `open-sans`
    #[serde(default)]
    pub font_family: Option<String>,
}

impl From<UpdateBrandingRequest> for BrandingUpdate {
    fn from(request: UpdateBrandingRequest) -> Self {
        BrandingUpdate {
            primary_color: request.primary_color,
            secondary_color: request.secondary_color,
            logo_url: request.logo_url,
            font_family: request
                .font_family
                .unwrap_or_else(|| FontFamily::default().to_string()),
        }
    }
}

/// Update Branding Handler
#[endpoint(
    tags("branding"),
    summary = "Update Branding",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Branding stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateBrandingRequest>,
    depot: &mut Depot,
) -> Result<Json<BrandingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let branding = state
        .app
        .branding
        .upsert_branding(tenant, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(branding.into()))
}
