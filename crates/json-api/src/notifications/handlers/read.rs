//! Mark Notification Read Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, notifications::errors::into_status_error, state::State};

/// Mark Notification Read Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark Notification Read",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Notification marked read"),
        (status_code = StatusCode::NOT_FOUND, description = "Notification not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    notification: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    state
        .app
        .notifications
        .mark_read(tenant, notification.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use stampbook_app::domain::notifications::{
        MockNotificationsService, NotificationsServiceError, records::NotificationUuid,
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::{super::tests::make_notification, *};

    fn make_service(notifications: MockNotificationsService) -> Service {
        tenant_service(
            Mocks {
                notifications,
                ..Mocks::default()
            },
            Router::with_path("notifications/{notification}/read").post(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_read_returns_204() -> TestResult {
        let uuid = NotificationUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_mark_read()
            .once()
            .withf(move |tenant, notification| *tenant == TEST_TENANT_UUID && *notification == uuid)
            .return_once(move |_, _| Ok(make_notification(uuid, Some(Timestamp::UNIX_EPOCH))));

        let res = TestClient::post(format!("http://example.com/notifications/{uuid}/read"))
            .send(&make_service(notifications))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_unknown_read_returns_404() -> TestResult {
        let uuid = NotificationUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_mark_read()
            .once()
            .return_once(|_, _| Err(NotificationsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/notifications/{uuid}/read"))
            .send(&make_service(notifications))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
