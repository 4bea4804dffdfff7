//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::{
    tenants::{
        repository::PgTenantsRepository, service::sync_owner_tenants,
        suspension::TenantStatusChanges,
    },
    users::{
        data::{NewUser, normalise_email},
        errors::UsersServiceError,
        records::{Plan, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    pool: PgPool,
    repository: PgUsersRepository,
    tenants_repository: PgTenantsRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgUsersRepository::new(),
            tenants_repository: PgTenantsRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let email = normalise_email(&user.email);

        if email.is_empty() || !email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.pool.begin().await?;

        let created = self.repository.create_user(&mut tx, &user, &email).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.pool.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.pool.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn set_plan(
        &self,
        user: UserUuid,
        plan: Plan,
    ) -> Result<(UserRecord, TenantStatusChanges), UsersServiceError> {
        let mut tx = self.pool.begin().await?;

        self.repository.lock_user(&mut tx, user).await?;

        let updated = self.repository.set_plan(&mut tx, user, plan).await?;

        let changes =
            sync_owner_tenants(&mut tx, &self.repository, &self.tenants_repository, user).await?;

        tx.commit().await?;

        Ok((updated, changes))
    }
}

#[automock]
#[async_trait]
/// Owner account operations.
pub trait UsersService: Send + Sync {
    /// Creates a new owner.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single owner.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Lists all owners, oldest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Changes an owner's plan and re-syncs their tenants against it.
    async fn set_plan(
        &self,
        user: UserUuid,
        plan: Plan,
    ) -> Result<(UserRecord, TenantStatusChanges), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::tenants::{
            TenantsService,
            data::NewTenant,
            records::{TenantStatus, TenantUuid},
        },
        test::TestContext,
    };

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            email: email.to_string(),
            name: "Owner".to_string(),
            plan: Plan::Free,
        }
    }

    #[tokio::test]
    async fn create_user_normalises_email() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(new_user("  Someone@Example.COM "))
            .await?;

        assert_eq!(user.email, "someone@example.com");
        assert_eq!(user.plan, Plan::Free);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.create_user(new_user("dupe@example.com")).await?;

        let result = ctx.users.create_user(new_user("DUPE@example.com")).await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_rejects_malformed_email() {
        let ctx = TestContext::new().await;

        let result = ctx.users.create_user(new_user("not-an-email")).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_plan_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.set_plan(UserUuid::new(), Plan::Pro).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn upgrade_reactivates_suspended_tenants() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_owner(Plan::Free).await;

        let mut created = Vec::new();

        for slug in ["up-a", "up-b", "up-c"] {
            created.push(
                ctx.tenants
                    .create_tenant(NewTenant {
                        uuid: TenantUuid::new(),
                        owner_uuid: owner,
                        name: slug.to_string(),
                        slug: slug.to_string(),
                    })
                    .await?,
            );
        }

        let suspended: Vec<TenantUuid> = created
            .iter()
            .filter(|tenant| tenant.status == TenantStatus::Suspended)
            .map(|tenant| tenant.uuid)
            .collect();

        assert_eq!(suspended.len(), 2, "free plan keeps one tenant active");

        let (user, changes) = ctx.users.set_plan(owner, Plan::Pro).await?;

        assert_eq!(user.plan, Plan::Pro);
        assert_eq!(changes.activated, suspended);
        assert!(changes.suspended.is_empty(), "nothing should be suspended");

        Ok(())
    }
}
