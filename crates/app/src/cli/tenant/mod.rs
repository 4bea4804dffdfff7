use clap::{Args, Subcommand};
use stampbook_app::domain::tenants::suspension::TenantStatusChanges;

mod create;
mod delete;
mod list;
mod status;
mod sync;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    Create(create::CreateTenantArgs),
    List(list::ListTenantsArgs),
    /// Suspend a tenant until the next plan sync
    Suspend(status::TenantStatusArgs),
    /// Activate a tenant until the next plan sync
    Activate(status::TenantStatusArgs),
    Delete(delete::DeleteTenantArgs),
    /// Recompute an owner's tenant statuses from their plan
    Sync(sync::SyncTenantsArgs),
}

pub(crate) async fn run(command: TenantCommand) -> Result<(), String> {
    match command.command {
        TenantSubcommand::Create(args) => create::run(args).await,
        TenantSubcommand::List(args) => list::run(args).await,
        TenantSubcommand::Suspend(args) => status::suspend(args).await,
        TenantSubcommand::Activate(args) => status::activate(args).await,
        TenantSubcommand::Delete(args) => delete::run(args).await,
        TenantSubcommand::Sync(args) => sync::run(args).await,
    }
}

pub(crate) fn print_status_changes(changes: &TenantStatusChanges) {
    if changes.is_empty() {
        println!("tenant statuses unchanged");
        return;
    }

    for tenant in &changes.suspended {
        println!("suspended: {tenant}");
    }

    for tenant in &changes.activated {
        println!("activated: {tenant}");
    }
}
