//! Notification Errors

use salvo::http::StatusError;
use tracing::error;

use stampbook_app::domain::notifications::NotificationsServiceError;

pub(crate) fn into_status_error(error: NotificationsServiceError) -> StatusError {
    match error {
        NotificationsServiceError::NotFound => {
            StatusError::not_found().brief("Notification not found")
        }
        NotificationsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Notification already exists")
        }
        NotificationsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid notification reference")
        }
        NotificationsServiceError::Sql(source) => {
            error!("notification storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
