use clap::Args;
use stampbook_app::domain::{
    tenants::{PgTenantsService, TenantsService, data::NewTenant, records::TenantUuid},
    users::records::UserUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTenantArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Owner of the new tenant
    #[arg(long)]
    owner_uuid: Uuid,

    /// Tenant display name
    #[arg(long)]
    name: String,

    /// Public slug used in customer-facing URLs
    #[arg(long)]
    slug: String,

    /// Optional tenant UUID; generated when omitted
    #[arg(long)]
    tenant_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateTenantArgs) -> Result<(), String> {
    let service = PgTenantsService::new(args.database.connect().await?);

    let tenant = service
        .create_tenant(NewTenant {
            uuid: args
                .tenant_uuid
                .map_or_else(TenantUuid::new, TenantUuid::from_uuid),
            owner_uuid: UserUuid::from_uuid(args.owner_uuid),
            name: args.name,
            slug: args.slug,
        })
        .await
        .map_err(|error| format!("failed to create tenant: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("tenant_name: {}", tenant.name);
    println!("slug: {}", tenant.slug);
    println!("status: {}", tenant.status);

    Ok(())
}
