//! Loyalty Program Errors

use salvo::http::StatusError;
use tracing::error;

use stampbook_app::domain::programs::ProgramsServiceError;

pub(crate) fn into_status_error(error: ProgramsServiceError) -> StatusError {
    match error {
        ProgramsServiceError::NotFound => {
            StatusError::not_found().brief("Loyalty program not configured")
        }
        ProgramsServiceError::InvalidData(field) => {
            StatusError::bad_request().brief(format!("Invalid {field}"))
        }
        ProgramsServiceError::InvalidReference => {
            error!("loyalty program references a missing tenant");

            StatusError::internal_server_error()
        }
        ProgramsServiceError::Sql(source) => {
            error!("loyalty program storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
