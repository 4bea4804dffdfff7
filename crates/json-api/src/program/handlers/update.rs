//! Update Loyalty Program Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stampbook_app::domain::programs::data::ProgramUpdate;

use crate::{
    extensions::*,
    program::{ProgramResponse, errors::into_status_error},
    state::State,
};

/// Update Loyalty Program Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProgramRequest {
    /// Stamps needed to unlock the reward, at least 1
    pub reward_threshold: u32,

    pub reward_description: String,
}

impl From<UpdateProgramRequest> for ProgramUpdate {
    fn from(request: UpdateProgramRequest) -> Self {
        ProgramUpdate {
            reward_threshold: request.reward_threshold,
            reward_description: request.reward_description,
        }
    }
}

/// Update Loyalty Program Handler
///
/// Creates the program on first use, replaces it afterwards.
#[endpoint(
    tags("program"),
    summary = "Update Loyalty Program",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Program stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProgramRequest>,
    depot: &mut Depot,
) -> Result<Json<ProgramResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let program = state
        .app
        .programs
        .upsert_program(tenant, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        tenant_uuid = %tenant,
        reward_threshold = program.reward_threshold,
        "updated loyalty program"
    );

    Ok(Json(program.into()))
}
