//! Get Loyalty Program Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    program::{ProgramResponse, errors::into_status_error},
    state::State,
};

/// Get Loyalty Program Handler
#[endpoint(
    tags("program"),
    summary = "Get Loyalty Program",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Program returned"),
        (status_code = StatusCode::NOT_FOUND, description = "Program not configured"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProgramResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let program = state
        .app
        .programs
        .get_program(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(program.into()))
}
