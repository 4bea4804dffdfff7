//! Tenant Errors

use salvo::http::StatusError;
use tracing::error;

use stampbook_app::domain::tenants::TenantsServiceError;

pub(crate) fn into_status_error(error: TenantsServiceError) -> StatusError {
    match error {
        TenantsServiceError::NotFound => StatusError::not_found().brief("Tenant not found"),
        TenantsServiceError::Sql(source) => {
            error!("tenant storage error: {source}");

            StatusError::internal_server_error()
        }
        other => {
            error!("unexpected tenant error: {other}");

            StatusError::internal_server_error()
        }
    }
}
