use clap::Args;
use stampbook_app::domain::{
    tenants::{PgTenantsService, TenantsService},
    users::records::UserUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTenantsArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Only list tenants of this owner
    #[arg(long)]
    owner_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: ListTenantsArgs) -> Result<(), String> {
    let service = PgTenantsService::new(args.database.connect().await?);

    let tenants = match args.owner_uuid {
        Some(owner) => service.list_owner_tenants(UserUuid::from_uuid(owner)).await,
        None => service.list_tenants().await,
    }
    .map_err(|error| format!("failed to list tenants: {error}"))?;

    if tenants.is_empty() {
        println!("no tenants found");
        return Ok(());
    }

    for tenant in tenants {
        println!("tenant_uuid: {}", tenant.uuid);
        println!("owner_uuid: {}", tenant.owner_uuid);
        println!("name: {}", tenant.name);
        println!("slug: {}", tenant.slug);
        println!("status: {}", tenant.status);
        println!("created_at: {}", tenant.created_at);
        println!();
    }

    Ok(())
}
