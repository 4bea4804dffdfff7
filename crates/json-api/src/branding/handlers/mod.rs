//! Branding Handlers

pub(crate) mod get;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use stampbook_app::domain::branding::records::BrandingRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandingResponse {
    /// `#rrggbb`
    pub primary_color: String,

    /// `#rrggbb`
    pub secondary_color: String,

    pub logo_url: Option<String>,

    pub font_family: String,

    /// Absent while the defaults are in use
    pub updated_at: Option<String>,
}

impl From<BrandingRecord> for BrandingResponse {
    fn from(branding: BrandingRecord) -> Self {
        BrandingResponse {
            primary_color: branding.primary_color,
            secondary_color: branding.secondary_color,
            logo_url: branding.logo_url,
            font_family: branding.font_family.to_string(),
            updated_at: branding.updated_at.as_ref().map(ToString::to_string),
        }
    }
}
