//! Notification Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stampbook_app::domain::notifications::records::NotificationRecord;

use crate::{extensions::*, notifications::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,

    /// `stamps_earned`, `stamps_redeemed` or `reward_unlocked`
    pub kind: String,

    pub message: String,

    /// Customer the notification is about
    pub customer_uuid: Option<Uuid>,

    pub read: bool,

    pub read_at: Option<String>,

    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        NotificationResponse {
            uuid: notification.uuid.into(),
            kind: notification.kind.to_string(),
            read: notification.is_read(),
            message: notification.message,
            customer_uuid: notification.customer_uuid.map(Into::into),
            read_at: notification.read_at.as_ref().map(ToString::to_string),
            created_at: notification.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    /// Newest first
    pub notifications: Vec<NotificationResponse>,
}

/// Notification Index Handler
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    unread: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<NotificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(tenant, unread.into_inner().unwrap_or(false))
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}
