//! Mark All Notifications Read Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, notifications::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsReadResponse {
    /// Number of notifications that were unread
    pub updated: u64,
}

/// Mark All Notifications Read Handler
#[endpoint(
    tags("notifications"),
    summary = "Mark All Notifications Read",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<NotificationsReadResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let updated = state
        .app
        .notifications
        .mark_all_read(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(NotificationsReadResponse { updated }))
}
