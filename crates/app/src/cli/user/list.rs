use clap::Args;
use rustc_hash::FxHashMap;
use stampbook_app::domain::{
    tenants::{PgTenantsService, TenantsService, records::TenantStatus},
    users::{PgUsersService, UsersService},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListUsersArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListUsersArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let users = PgUsersService::new(pool.clone())
        .list_users()
        .await
        .map_err(|error| format!("failed to list users: {error}"))?;

    if users.is_empty() {
        println!("no users found");
        return Ok(());
    }

    let tenants = PgTenantsService::new(pool)
        .list_tenants()
        .await
        .map_err(|error| format!("failed to list tenants: {error}"))?;

    // (active, total) per owner
    let mut counts: FxHashMap<_, (usize, usize)> = FxHashMap::default();

    for tenant in &tenants {
        let entry = counts.entry(tenant.owner_uuid).or_default();

        entry.1 += 1;

        if tenant.status == TenantStatus::Active {
            entry.0 += 1;
        }
    }

    for user in users {
        let (active, total) = counts.get(&user.uuid).copied().unwrap_or_default();
        let limit = user
            .plan
            .max_active_tenants()
            .map_or_else(|| "unlimited".to_string(), |limit| limit.to_string());

        println!("user_uuid: {}", user.uuid);
        println!("email: {}", user.email);
        println!("name: {}", user.name);
        println!("plan: {}", user.plan);
        println!("tenants: {active} active of {total} (limit {limit})");
        println!();
    }

    Ok(())
}
