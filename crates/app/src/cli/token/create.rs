use std::sync::Arc;

use clap::Args;
use jiff::Timestamp;
use stampbook_app::{
    auth::{OpenBaoClient, OpenBaoConfig, PgAuthService},
    domain::tenants::{
        PgTenantsService, TenantsService, TenantsServiceError,
        records::{TenantStatus, TenantUuid},
    },
};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::cli::{DatabaseArgs, token::print_token};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    openbao: OpenBaoArgs,

    /// Tenant UUID that should own the token
    #[arg(long)]
    tenant_uuid: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<Timestamp>,
}

#[derive(Debug, Args)]
struct OpenBaoArgs {
    /// OpenBao server address
    #[arg(long, env = "OPENBAO_ADDR")]
    openbao_addr: String,

    /// OpenBao authentication token
    #[arg(long, env = "OPENBAO_TOKEN", hide_env_values = true)]
    openbao_token: String,

    /// OpenBao Transit key name
    #[arg(long, env = "OPENBAO_TRANSIT_KEY")]
    openbao_transit_key: String,
}

impl OpenBaoArgs {
    fn into_client(self) -> OpenBaoClient {
        OpenBaoClient::new(OpenBaoConfig {
            addr: self.openbao_addr,
            token: Zeroizing::new(self.openbao_token),
            transit_key: self.openbao_transit_key,
        })
    }
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if let Some(expires_at) = args.token_expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let pool = args.database.connect().await?;
    let tenant_uuid = TenantUuid::from_uuid(args.tenant_uuid);

    let tenant = PgTenantsService::new(pool.clone())
        .get_tenant(tenant_uuid)
        .await
        .map_err(|error| match error {
            TenantsServiceError::NotFound => format!("tenant {tenant_uuid} does not exist"),
            other => format!("failed to load tenant: {other}"),
        })?;

    let service = PgAuthService::new(pool, Arc::new(args.openbao.into_client()));

    let issued = service
        .issue_api_token(tenant_uuid, args.token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    print_token(&issued.metadata);
    println!("api_token: {}", issued.token.as_str());
    println!("store this token now; it is only shown once");

    if tenant.status == TenantStatus::Suspended {
        println!(
            "warning: tenant {} is suspended; requests with this token get 403 until it is reactivated",
            tenant.slug
        );
    }

    Ok(())
}
