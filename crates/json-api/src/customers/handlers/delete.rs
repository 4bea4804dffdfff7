//! Delete Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Delete Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Delete Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Customer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    state
        .app
        .customers
        .delete_customer(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use stampbook_app::domain::customers::{
        CustomersServiceError, MockCustomersService, records::CustomerUuid,
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::*;

    fn make_service(customers: MockCustomersService) -> Service {
        tenant_service(
            Mocks {
                customers,
                ..Mocks::default()
            },
            Router::with_path("customers/{customer}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_customer_returns_204() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_delete_customer()
            .once()
            .withf(move |tenant, customer| *tenant == TEST_TENANT_UUID && *customer == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/customers/{uuid}"))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_customer_returns_404() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_delete_customer()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/customers/{uuid}"))
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::delete("http://example.com/customers/123")
            .send(&make_service(MockCustomersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
