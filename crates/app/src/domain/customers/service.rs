//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        customers::{
            data::{CustomerUpdate, NewCustomer},
            errors::CustomersServiceError,
            records::{CustomerRecord, CustomerUuid},
            repository::PgCustomersRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn list_customers(
        &self,
        tenant: TenantUuid,
        email: Option<String>,
    ) -> Result<Vec<CustomerRecord>, CustomersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let email = email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty());

        let customers = self.repository.list_customers(&mut tx, email).await?;

        tx.commit().await?;

        Ok(customers)
    }

    async fn get_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn create_customer(
        &self,
        tenant: TenantUuid,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let contact = customer
            .contact()
            .ok_or(CustomersServiceError::InvalidData)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self
            .repository
            .create_customer(&mut tx, customer.uuid, contact)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let contact = update.contact().ok_or(CustomersServiceError::InvalidData)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self
            .repository
            .update_customer(&mut tx, customer, contact)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<(), CustomersServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows_affected = self.repository.delete_customer(&mut tx, customer).await?;

        if rows_affected == 0 {
            return Err(CustomersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Lists customers, optionally filtered by exact (case-insensitive) email.
    async fn list_customers(
        &self,
        tenant: TenantUuid,
        email: Option<String>,
    ) -> Result<Vec<CustomerRecord>, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Creates a customer with empty stamp balances.
    async fn create_customer(
        &self,
        tenant: TenantUuid,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Updates contact details; balances are left untouched.
    async fn update_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Soft-deletes a customer.
    async fn delete_customer(
        &self,
        tenant: TenantUuid,
        customer: CustomerUuid,
    ) -> Result<(), CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_customer};

    use super::*;

    #[tokio::test]
    async fn create_customer_starts_with_empty_balances() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CustomerUuid::new();

        let customer = ctx
            .customers
            .create_customer(
                ctx.tenant_uuid,
                NewCustomer {
                    uuid,
                    name: " Ada Lovelace ".to_string(),
                    email: Some("Ada@Example.com".to_string()),
                    phone: None,
                },
            )
            .await?;

        assert_eq!(customer.uuid, uuid);
        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.email.as_deref(), Some("ada@example.com"));
        assert_eq!(customer.current_stamps, 0);
        assert_eq!(customer.total_stamps, 0);
        assert!(customer.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_customer_blank_name_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let mut customer = new_customer("someone@example.com");
        customer.name = "  ".to_string();

        let result = ctx.customers.create_customer(ctx.tenant_uuid, customer).await;

        assert!(
            matches!(result, Err(CustomersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_email_within_tenant_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.customers
            .create_customer(ctx.tenant_uuid, new_customer("same@example.com"))
            .await?;

        let result = ctx
            .customers
            .create_customer(ctx.tenant_uuid, new_customer("SAME@example.com"))
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn same_email_allowed_across_tenants() -> TestResult {
        let ctx = TestContext::new().await;
        let tenant_b = ctx.create_tenant("tenant-b").await;

        ctx.customers
            .create_customer(ctx.tenant_uuid, new_customer("shared@example.com"))
            .await?;

        ctx.customers
            .create_customer(tenant_b, new_customer("shared@example.com"))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn same_uuid_allowed_across_tenants() -> TestResult {
        let ctx = TestContext::new().await;
        let tenant_b = ctx.create_tenant("tenant-b").await;

        let first = new_customer("first@example.com");
        let uuid = first.uuid;

        ctx.customers.create_customer(ctx.tenant_uuid, first).await?;

        let second = ctx
            .customers
            .create_customer(
                tenant_b,
                NewCustomer {
                    uuid,
                    ..new_customer("second@example.com")
                },
            )
            .await?;

        assert_eq!(second.uuid, uuid);
        assert_eq!(
            ctx.customers.get_customer(ctx.tenant_uuid, uuid).await?.email.as_deref(),
            Some("first@example.com"),
            "each tenant keeps its own customer"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_customers_filters_by_email() -> TestResult {
        let ctx = TestContext::new().await;

        let wanted = ctx
            .customers
            .create_customer(ctx.tenant_uuid, new_customer("wanted@example.com"))
            .await?;

        ctx.customers
            .create_customer(ctx.tenant_uuid, new_customer("other@example.com"))
            .await?;

        let all = ctx.customers.list_customers(ctx.tenant_uuid, None).await?;

        assert_eq!(all.len(), 2, "expected both customers");

        let filtered = ctx
            .customers
            .list_customers(ctx.tenant_uuid, Some("Wanted@Example.com".to_string()))
            .await?;

        assert_eq!(
            filtered.iter().map(|c| c.uuid).collect::<Vec<_>>(),
            vec![wanted.uuid],
            "expected only the matching customer"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_customer_keeps_balances() -> TestResult {
        let ctx = TestContext::new().await;

        let customer = ctx
            .customers
            .create_customer(ctx.tenant_uuid, new_customer("before@example.com"))
            .await?;

        let updated = ctx
            .customers
            .update_customer(
                ctx.tenant_uuid,
                customer.uuid,
                CustomerUpdate {
                    name: "Renamed".to_string(),
                    email: Some("after@example.com".to_string()),
                    phone: Some("555-0100".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email.as_deref(), Some("after@example.com"));
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.current_stamps, customer.current_stamps);
        assert_eq!(updated.total_stamps, customer.total_stamps);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_customer_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .customers
            .update_customer(
                ctx.tenant_uuid,
                CustomerUuid::new(),
                CustomerUpdate {
                    name: "Nobody".to_string(),
                    email: None,
                    phone: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_customer_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let customer = ctx
            .customers
            .create_customer(ctx.tenant_uuid, new_customer("bye@example.com"))
            .await?;

        ctx.customers
            .delete_customer(ctx.tenant_uuid, customer.uuid)
            .await?;

        let result = ctx
            .customers
            .get_customer(ctx.tenant_uuid, customer.uuid)
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let second = ctx
            .customers
            .delete_customer(ctx.tenant_uuid, customer.uuid)
            .await;

        assert!(
            matches!(second, Err(CustomersServiceError::NotFound)),
            "expected NotFound on repeated delete, got {second:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customer_not_visible_to_other_tenant() -> TestResult {
        let ctx = TestContext::new().await;

        let customer = ctx
            .customers
            .create_customer(ctx.tenant_uuid, new_customer("private@example.com"))
            .await?;

        let tenant_b = ctx.create_tenant("tenant-b").await;

        let result = ctx.customers.get_customer(tenant_b, customer.uuid).await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound for cross-tenant access, got {result:?}"
        );

        let listed = ctx.customers.list_customers(tenant_b, None).await?;

        assert!(listed.is_empty(), "tenant B should see no customers");

        Ok(())
    }
}
