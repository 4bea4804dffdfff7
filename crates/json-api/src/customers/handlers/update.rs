//! Update Customer Handler

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

use stampbook_app::domain::customers::data::CustomerUpdate;

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Update Customer Request
///
/// Replaces the contact details; stamp balances only change through
/// transactions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCustomerRequest {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(request: UpdateCustomerRequest) -> Self {
        CustomerUpdate {
            name: request.name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Customer Update Handler
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::CONFLICT, description = "Email already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "customers.update",
    skip(customer, json, depot),
    fields(
        tenant_uuid = tracing::field::Empty,
        customer_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    json: JsonBody<UpdateCustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let customer = customer.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("customer_uuid", tracing::field::display(customer));

    let updated = state
        .app
        .customers
        .update_customer(tenant, customer.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stampbook_app::domain::customers::{
        CustomersServiceError, MockCustomersService, records::CustomerUuid,
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::{super::tests::make_customer, *};

    fn make_service(customers: MockCustomersService) -> Service {
        tenant_service(
            Mocks {
                customers,
                ..Mocks::default()
            },
            Router::with_path("customers/{customer}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_customer_success() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut updated = make_customer(uuid);

        updated.name = "Ada King".to_string();

        let mut customers = MockCustomersService::new();

        customers
            .expect_update_customer()
            .once()
            .withf(move |tenant, customer, update| {
                *tenant == TEST_TENANT_UUID
                    && *customer == uuid
                    && *update
                        == CustomerUpdate {
                            name: "Ada King".to_string(),
                            email: None,
                            phone: Some("0123".to_string()),
                        }
            })
            .return_once(move |_, _, _| Ok(updated));

        let mut res = TestClient::put(format!("http://example.com/customers/{uuid}"))
            .json(&json!({ "name": "Ada King", "phone": "0123" }))
            .send(&make_service(customers))
            .await;

        let body: CustomerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Ada King");
        assert_eq!(body.current_stamps, 4, "balances are untouched");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_customer_returns_404() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_update_customer()
            .once()
            .return_once(|_, _, _| Err(CustomersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/customers/{uuid}"))
            .json(&json!({ "name": "Ada" }))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_missing_body_returns_400() -> TestResult {
        let uuid = CustomerUuid::new();

        let res = TestClient::put(format!("http://example.com/customers/{uuid}"))
            .send(&make_service(MockCustomersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
