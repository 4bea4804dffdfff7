//! Get Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stampbook_app::domain::customers::records::CustomerRecord;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    /// The unique identifier of the customer
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Contact email, lower-cased
    pub email: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Stamps available to redeem
    pub current_stamps: u32,

    /// Stamps earned over the customer's lifetime
    pub total_stamps: u32,

    /// The date and time the customer was created
    pub created_at: String,

    /// The date and time the customer was last updated
    pub updated_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        CustomerResponse {
            uuid: customer.uuid.into(),
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            current_stamps: customer.current_stamps,
            total_stamps: customer.total_stamps,
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        }
    }
}

/// Get Customer Handler
///
/// Returns a customer with their stamp balances.
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let customer = state
        .app
        .customers
        .get_customer(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
