//! Create Customer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stampbook_app::domain::customers::{data::NewCustomer, records::CustomerUuid};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Create Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCustomerRequest {
    /// Client-chosen identifier; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        NewCustomer {
            uuid: request.uuid.map_or_else(CustomerUuid::new, Into::into),
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Create Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "Customer already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "customers.create",
    skip(json, depot, res),
    fields(tenant_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    tracing::Span::current().record("tenant_uuid", tracing::field::display(tenant));

    let customer = state
        .app
        .customers
        .create_customer(tenant, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/customers/{}", customer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(customer_uuid = %customer.uuid, "created customer");

    Ok(Json(customer.into()))
}
