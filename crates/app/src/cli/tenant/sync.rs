use clap::Args;
use stampbook_app::domain::{
    tenants::{PgTenantsService, TenantsService},
    users::records::UserUuid,
};
use uuid::Uuid;

use crate::cli::{DatabaseArgs, tenant::print_status_changes};

#[derive(Debug, Args)]
pub(crate) struct SyncTenantsArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Owner whose tenants should be re-evaluated
    #[arg(long)]
    owner_uuid: Uuid,
}

pub(crate) async fn run(args: SyncTenantsArgs) -> Result<(), String> {
    let service = PgTenantsService::new(args.database.connect().await?);

    let changes = service
        .sync_user_tenants(UserUuid::from_uuid(args.owner_uuid))
        .await
        .map_err(|error| format!("failed to sync tenants: {error}"))?;

    print_status_changes(&changes);

    Ok(())
}
