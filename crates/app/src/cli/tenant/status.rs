use clap::Args;
use stampbook_app::domain::tenants::{
    PgTenantsService, TenantsService,
    records::{TenantStatus, TenantUuid},
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct TenantStatusArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Tenant to update
    #[arg(long)]
    tenant_uuid: Uuid,
}

pub(crate) async fn suspend(args: TenantStatusArgs) -> Result<(), String> {
    set_status(args, TenantStatus::Suspended).await
}

pub(crate) async fn activate(args: TenantStatusArgs) -> Result<(), String> {
    set_status(args, TenantStatus::Active).await
}

async fn set_status(args: TenantStatusArgs, status: TenantStatus) -> Result<(), String> {
    let service = PgTenantsService::new(args.database.connect().await?);

    let tenant = service
        .set_tenant_status(TenantUuid::from_uuid(args.tenant_uuid), status)
        .await
        .map_err(|error| format!("failed to set tenant status: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("status: {}", tenant.status);
    println!("note: the next plan sync for this owner recomputes the status");

    Ok(())
}
