//! Database connection management

use sqlx::{
    PgPool, Postgres, Transaction,
    migrate::{MigrateError, Migrator},
    query, query_as, query_scalar,
};
use thiserror::Error;

use crate::domain::tenants::records::TenantUuid;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// SQL used to set tenant context for row-level security.
pub const SET_TENANT_CONTEXT_SQL: &str = "SELECT set_config('app.current_tenant_uuid', $1, true)";

const CURRENT_ROLE_FLAGS_SQL: &str =
    "SELECT rolname, rolsuper, rolbypassrls FROM pg_roles WHERE rolname = current_user";

const ROLE_EXISTS_SQL: &str = "SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for operations that are not tenant-scoped.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set tenant context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting tenant context fails.
    pub async fn begin_tenant_transaction(
        &self,
        tenant: TenantUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_TENANT_CONTEXT_SQL)
            .bind(tenant.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Errors raised while checking the runtime database role.
#[derive(Debug, Error)]
pub enum RoleCheckError {
    #[error("failed to inspect current database role")]
    Sql(#[from] sqlx::Error),

    #[error("database role `{0}` bypasses row-level security; connect as a NOSUPERUSER NOBYPASSRLS role")]
    BypassesRls(String),
}

/// Errors raised while provisioning the runtime database role.
#[derive(Debug, Error)]
pub enum AppRoleError {
    #[error("invalid role name `{0}`")]
    InvalidRoleName(String),

    #[error("failed to provision database role")]
    Sql(#[from] sqlx::Error),
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending schema migrations.
///
/// Must run as the schema owner, not the RLS-bound runtime role.
///
/// # Errors
///
/// Returns an error when a migration fails or the applied history diverges
/// from the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Refuse to run tenant-scoped traffic as a role that ignores RLS policies.
///
/// # Errors
///
/// Returns an error when the role cannot be inspected or when it is a
/// superuser or carries `BYPASSRLS`.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), RoleCheckError> {
    let (role, superuser, bypass_rls): (String, bool, bool) =
        query_as(CURRENT_ROLE_FLAGS_SQL).fetch_one(pool).await?;

    if superuser || bypass_rls {
        return Err(RoleCheckError::BypassesRls(role));
    }

    Ok(())
}

/// Quote `role` server-side for interpolation into role DDL.
async fn quote_role(
    tx: &mut Transaction<'_, Postgres>,
    role: &str,
) -> Result<String, AppRoleError> {
    if role.trim().is_empty() {
        return Err(AppRoleError::InvalidRoleName(role.to_string()));
    }

    Ok(query_scalar("SELECT quote_ident($1)")
        .bind(role)
        .fetch_one(&mut **tx)
        .await?)
}

/// Create the login role the services run as, or rotate its password.
///
/// The role is forced to `NOSUPERUSER NOBYPASSRLS` so it can never read
/// across tenants. Must be run as a role with `CREATEROLE`.
///
/// # Errors
///
/// Returns an error for a blank role name or when a statement fails.
pub async fn ensure_app_role(pool: &PgPool, role: &str, password: &str) -> Result<(), AppRoleError> {
    let mut tx = pool.begin().await?;

    let role_ident = quote_role(&mut tx, role).await?;

    let password_literal: String = query_scalar("SELECT quote_literal($1)")
        .bind(password)
        .fetch_one(&mut *tx)
        .await?;

    let (exists,): (bool,) = query_as(ROLE_EXISTS_SQL).bind(role).fetch_one(&mut *tx).await?;

    let verb = if exists { "ALTER" } else { "CREATE" };

    query(&format!(
        "{verb} ROLE {role_ident} LOGIN PASSWORD {password_literal} \
         NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS"
    ))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// Grant `role` access to the current database's tables, now and for tables
/// created by later migrations.
///
/// # Errors
///
/// Returns an error for a blank role name or when a statement fails.
pub async fn grant_app_role(pool: &PgPool, role: &str) -> Result<(), AppRoleError> {
    let mut tx = pool.begin().await?;

    let role_ident = quote_role(&mut tx, role).await?;

    let database_ident: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await?;

    for statement in [
        format!("GRANT CONNECT ON DATABASE {database_ident} TO {role_ident}"),
        format!("GRANT USAGE ON SCHEMA public TO {role_ident}"),
        format!(
            "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role_ident}"
        ),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public \
             GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role_ident}"
        ),
    ] {
        query(&statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::db::TestDb;

    use super::*;

    #[tokio::test]
    async fn superuser_connection_fails_rls_check() {
        let db = TestDb::new().await;

        let result = ensure_rls_enforced_role(db.pool()).await;

        assert!(
            matches!(result, Err(RoleCheckError::BypassesRls(_))),
            "expected BypassesRls, got {result:?}"
        );
    }

    #[tokio::test]
    async fn blank_role_name_is_rejected() {
        let db = TestDb::new().await;

        let result = ensure_app_role(db.pool(), "  ", "secret").await;

        assert!(
            matches!(result, Err(AppRoleError::InvalidRoleName(_))),
            "expected InvalidRoleName, got {result:?}"
        );
    }

    #[tokio::test]
    async fn ensure_app_role_rotates_password() -> TestResult {
        let db = TestDb::new().await;
        let role = "stampbook_rotation_test";

        ensure_app_role(db.pool(), role, "first-password").await?;
        ensure_app_role(db.pool(), role, "rotated-password").await?;
        grant_app_role(db.pool(), role).await?;

        let pool = PgPool::connect(&db.url_for(role, "rotated-password")).await?;

        ensure_rls_enforced_role(&pool).await?;

        Ok(())
    }

    #[tokio::test]
    async fn tenant_transaction_sets_context() -> TestResult {
        let db = TestDb::new().await;
        let tenant = TenantUuid::new();

        let mut tx = Db::new(db.pool().clone())
            .begin_tenant_transaction(tenant)
            .await?;

        let (current,): (String,) =
            query_as("SELECT current_setting('app.current_tenant_uuid')")
                .fetch_one(&mut *tx)
                .await?;

        assert_eq!(current, tenant.to_string());

        Ok(())
    }
}
