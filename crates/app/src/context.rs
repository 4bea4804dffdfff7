//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, OpenBaoClient, PgAuthService},
    database::{self, Db, RoleCheckError},
    domain::{
        branding::{BrandingService, PgBrandingService},
        customers::{CustomersService, PgCustomersService},
        notifications::{NotificationsService, PgNotificationsService},
        programs::{PgProgramsService, ProgramsService},
        tenants::{PgTenantsService, TenantsService},
        transactions::{PgTransactionsService, TransactionsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("refusing to serve tenant traffic")]
    RoleCheck(#[source] RoleCheckError),
}

/// Services the HTTP surface depends on.
#[derive(Clone)]
pub struct AppContext {
    pub tenants: Arc<dyn TenantsService>,
    pub customers: Arc<dyn CustomersService>,
    pub programs: Arc<dyn ProgramsService>,
    pub branding: Arc<dyn BrandingService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or when
    /// the connected role would bypass row-level security.
    pub async fn from_database_url(
        url: &str,
        openbao: OpenBaoClient,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool)
            .await
            .map_err(AppInitError::RoleCheck)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            tenants: Arc::new(PgTenantsService::new(pool.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            programs: Arc::new(PgProgramsService::new(db.clone())),
            branding: Arc::new(PgBrandingService::new(db.clone())),
            transactions: Arc::new(PgTransactionsService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, Arc::new(openbao))),
        })
    }
}
