//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::{
    auth::{
        ApiToken, AuthServiceError, IssuedApiToken, TokenHasher, models::NewApiToken,
        repository::PgAuthRepository,
    },
    domain::tenants::records::TenantUuid,
};

#[derive(Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    hasher: Arc<dyn TokenHasher>,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, hasher: Arc<dyn TokenHasher>) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            hasher,
        }
    }

    /// Issue a new API token for the given tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if HMAC computation or database insertion fails.
    pub async fn issue_api_token(
        &self,
        tenant_uuid: TenantUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = ApiToken::generate();

        let token_hash = self.hasher.hmac(&token.verifier_input(tenant_uuid)).await?;

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.token_uuid,
                tenant_uuid,
                version: token.version,
                token_hash,
                expires_at,
            })
            .await?;

        debug!(tenant = %tenant_uuid, token = %token.token_uuid, "issued api token");

        Ok(IssuedApiToken {
            token: token.expose(),
            metadata,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<TenantUuid, AuthServiceError> {
        let parsed_token = bearer_token
            .parse::<ApiToken>()
            .map_err(|_malformed| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier_input = parsed_token.verifier_input(token.tenant_uuid);

        if !self
            .hasher
            .verify(&verifier_input, &token.token_hash)
            .await?
        {
            return Err(AuthServiceError::NotFound);
        }

        if !token.tenant_can_serve() {
            return Err(AuthServiceError::TenantSuspended);
        }

        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(token = %parsed_token.token_uuid, %error, "failed to record api token use");
        }

        Ok(token.tenant_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the tenant it belongs to.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<TenantUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        auth::{OpenBaoError, PgAuthRepository},
        domain::tenants::{TenantsService, records::TenantStatus},
        test::TestContext,
    };

    use super::*;

    /// Deterministic stand-in for the Transit engine.
    #[derive(Debug)]
    struct PlainHasher;

    #[async_trait]
    impl TokenHasher for PlainHasher {
        async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
            Ok(format!("plain:{}", String::from_utf8_lossy(input)))
        }

        async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
            Ok(self.hmac(input).await? == hmac)
        }
    }

    fn service(ctx: &TestContext) -> PgAuthService {
        PgAuthService::new(ctx.db.pool().clone(), Arc::new(PlainHasher))
    }

    fn repository(ctx: &TestContext) -> PgAuthRepository {
        PgAuthRepository::new(ctx.db.pool().clone())
    }

    #[tokio::test]
    async fn issued_token_authenticates_to_its_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.tenant_uuid, None).await?;

        assert_eq!(issued.metadata.tenant_uuid, ctx.tenant_uuid);
        assert!(issued.token.starts_with("sb_v1_"), "unexpected token format");

        let tenant = auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(tenant, ctx.tenant_uuid);

        let listed = repository(&ctx)
            .list_api_tokens(Some(ctx.tenant_uuid))
            .await?;

        assert!(
            listed.iter().all(|token| token.last_used_at.is_some()),
            "authentication should record last use"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.tenant_uuid, None).await?;

        let (id, secret) = issued
            .token
            .split_once('.')
            .ok_or("token has no secret segment")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{id}.{flipped}{}", secret.get(1..).unwrap_or_default());

        let result = auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_not_found() {
        let ctx = TestContext::new().await;

        let result = service(&ctx).authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.tenant_uuid, None).await?;

        let revoked = repository(&ctx)
            .revoke_api_token(issued.metadata.uuid)
            .await?
            .ok_or("token should have been active")?;

        assert!(revoked.revoked_at.is_some(), "token should carry revoked_at");

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let again = repository(&ctx)
            .revoke_api_token(issued.metadata.uuid)
            .await?;

        assert!(again.is_none(), "token was already revoked");

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let expired_at = Timestamp::now() - SignedDuration::from_mins(1);

        let issued = auth.issue_api_token(ctx.tenant_uuid, Some(expired_at)).await?;

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn suspended_tenant_token_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.tenant_uuid, None).await?;

        ctx.tenants
            .set_tenant_status(ctx.tenant_uuid, TenantStatus::Suspended)
            .await?;

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::TenantSuspended)),
            "expected TenantSuspended, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_tenant_token_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.tenant_uuid, None).await?;

        ctx.tenants.delete_tenant(ctx.tenant_uuid).await?;

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::TenantSuspended)),
            "expected TenantSuspended, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_tenant_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = service(&ctx).issue_api_token(TenantUuid::new(), None).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
