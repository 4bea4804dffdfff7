//! Transaction Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    transactions::{TransactionResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    /// The customer's ledger, newest first
    pub transactions: Vec<TransactionResponse>,
}

/// Transaction Index Handler
///
/// Returns a customer's stamp ledger.
#[endpoint(
    tags("transactions"),
    summary = "List Customer Transactions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ledger returned"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let transactions = state
        .app
        .transactions
        .list_transactions(tenant, customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(TransactionsResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stampbook_app::domain::{
        customers::records::CustomerUuid,
        transactions::{
            MockTransactionsService, TransactionsServiceError,
            records::{StampTransactionKind, StampTransactionUuid},
        },
    };

    use crate::test_helpers::{Mocks, TEST_TENANT_UUID, tenant_service};

    use super::{super::tests::make_transaction, *};

    fn make_service(transactions: MockTransactionsService) -> Service {
        tenant_service(
            Mocks {
                transactions,
                ..Mocks::default()
            },
            Router::with_path("customers/{customer}/transactions").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_ledger() -> TestResult {
        let customer = CustomerUuid::new();
        let redeem = StampTransactionUuid::new();
        let earn = StampTransactionUuid::new();

        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .withf(move |tenant, c| *tenant == TEST_TENANT_UUID && *c == customer)
            .return_once(move |_, _| {
                Ok(vec![
                    make_transaction(redeem, customer, StampTransactionKind::Redeem, 2, 3),
                    make_transaction(earn, customer, StampTransactionKind::Earn, 5, 5),
                ])
            });

        let response: TransactionsResponse =
            TestClient::get(format!("http://example.com/customers/{customer}/transactions"))
                .send(&make_service(transactions))
                .await
                .take_json()
                .await?;

        let kinds: Vec<_> = response
            .transactions
            .iter()
            .map(|transaction| transaction.kind.as_str())
            .collect();

        assert_eq!(kinds, vec!["REDEEM", "EARN"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_customer_returns_404() -> TestResult {
        let customer = CustomerUuid::new();

        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .return_once(|_, _| Err(TransactionsServiceError::CustomerNotFound));

        let res = TestClient::get(format!("http://example.com/customers/{customer}/transactions"))
            .send(&make_service(transactions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
