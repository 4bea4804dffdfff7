//! Create Transaction Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stampbook_app::domain::transactions::{
    data::NewStampTransaction,
    records::{StampTransactionKind, StampTransactionUuid},
};

use crate::{
    customers::get::CustomerResponse,
    extensions::*,
    observability::observe_stamp_transaction,
    state::State,
    transactions::{TransactionResponse, errors::into_status_error},
};

/// Create Transaction Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTransactionRequest {
    /// Idempotency key; replaying a uuid returns 409. Generated when omitted.
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// `EARN` or `REDEEM`
    #[serde(rename = "type")]
    pub kind: String,

    /// Number of stamps, at least 1
    pub amount: u32,

    #[serde(default)]
    pub note: Option<String>,
}

/// Transaction Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionCreatedResponse {
    pub transaction: TransactionResponse,

    /// Customer balances after the transaction
    pub customer: CustomerResponse,

    /// Whether this transaction reached the program's reward threshold
    pub reward_unlocked: bool,
}

/// Create Transaction Handler
///
/// Earns or redeems stamps for a customer.
#[endpoint(
    tags("transactions"),
    summary = "Record Stamp Transaction",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Transaction recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::CONFLICT, description = "Transaction already recorded"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Insufficient stamps"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "transactions.create",
    skip(customer, json, depot, res),
    fields(
        tenant_uuid = tracing::field::Empty,
        customer_uuid = tracing::field::Empty,
        kind = tracing::field::Empty,
        amount = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<CreateTransactionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TransactionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let customer = customer.into_inner();
    let request = json.into_inner();

    let kind = request
        .kind
        .parse::<StampTransactionKind>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("customer_uuid", tracing::field::display(customer));
    span.record("kind", tracing::field::display(kind));
    span.record("amount", request.amount);

    let outcome = state
        .app
        .transactions
        .record_transaction(
            tenant,
            NewStampTransaction {
                uuid: request
                    .uuid
                    .map_or_else(StampTransactionUuid::new, Into::into),
                customer_uuid: customer.into(),
                kind,
                amount: request.amount,
                note: request.note,
            },
        )
        .await
        .map_err(into_status_error)?;

    observe_stamp_transaction(kind, request.amount, outcome.reward_unlocked);

    res.status_code(StatusCode::CREATED);

    Ok(Json(TransactionCreatedResponse {
        transaction: outcome.transaction.into(),
        customer: outcome.customer.into(),
        reward_unlocked: outcome.reward_unlocked,
    }))
}
