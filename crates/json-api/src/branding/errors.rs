//! Branding Errors

use salvo::http::StatusError;
use tracing::error;

use stampbook_app::domain::branding::BrandingServiceError;

pub(crate) fn into_status_error(error: BrandingServiceError) -> StatusError {
    match error {
        BrandingServiceError::InvalidData(field) => {
            StatusError::bad_request().brief(format!("Invalid {field}"))
        }
        BrandingServiceError::InvalidReference => {
            error!("branding references a missing tenant");

            StatusError::internal_server_error()
        }
        BrandingServiceError::Sql(source) => {
            error!("branding storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
