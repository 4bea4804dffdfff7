//! Customer Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersResponse {
    /// The tenant's customers, oldest first
    pub customers: Vec<CustomerResponse>,
}

/// Customer Index Handler
///
/// Returns the tenant's customers, optionally filtered by email.
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    email: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let customers = state
        .app
        .customers
        .list_customers(tenant, email.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CustomersResponse {
        customers: customers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stampbook_app::domain::customers::{
        CustomersServiceError, MockCustomersService, records::CustomerUuid,
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, storage_error, tenant_service};

    use super::{super::tests::make_customer, *};

    fn make_service(customers: MockCustomersService) -> Service {
        tenant_service(
            Mocks {
                customers,
                ..Mocks::default()
            },
            Router::with_path("customers").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_customers_in_order() -> TestResult {
        let first = CustomerUuid::new();
        let second = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_list_customers()
            .once()
            .withf(|tenant, email| *tenant == TEST_TENANT_UUID && email.is_none())
            .return_once(move |_, _| Ok(vec![make_customer(first), make_customer(second)]));

        let response: CustomersResponse = TestClient::get("http://example.com/customers")
            .send(&make_service(customers))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.customers.iter().map(|customer| customer.uuid).collect();

        assert_eq!(uuids, vec![first.into_uuid(), second.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_email_filter() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_list_customers()
            .once()
            .withf(|tenant, email| {
                *tenant == TEST_TENANT_UUID && email.as_deref() == Some("ada@example.com")
            })
            .return_once(|_, _| Ok(vec![]));

        let response: CustomersResponse =
            TestClient::get("http://example.com/customers?email=ada@example.com")
                .send(&make_service(customers))
                .await
                .take_json()
                .await?;

        assert!(response.customers.is_empty(), "expected no customers");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_list_customers()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::Sql(storage_error())));

        let res = TestClient::get("http://example.com/customers")
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
