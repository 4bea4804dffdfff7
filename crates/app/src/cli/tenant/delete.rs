use clap::Args;
use stampbook_app::domain::tenants::{PgTenantsService, TenantsService, records::TenantUuid};
use uuid::Uuid;

use crate::cli::{DatabaseArgs, tenant::print_status_changes};

#[derive(Debug, Args)]
pub(crate) struct DeleteTenantArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Tenant to soft-delete
    #[arg(long)]
    tenant_uuid: Uuid,
}

pub(crate) async fn run(args: DeleteTenantArgs) -> Result<(), String> {
    let service = PgTenantsService::new(args.database.connect().await?);

    let changes = service
        .delete_tenant(TenantUuid::from_uuid(args.tenant_uuid))
        .await
        .map_err(|error| format!("failed to delete tenant: {error}"))?;

    println!("deleted tenant {}", args.tenant_uuid);
    print_status_changes(&changes);

    Ok(())
}
