use clap::Args;
use stampbook_app::domain::users::{
    PgUsersService, UsersService,
    records::{Plan, UserUuid},
};
use uuid::Uuid;

use crate::cli::{DatabaseArgs, tenant::print_status_changes};

#[derive(Debug, Args)]
pub(crate) struct SetPlanArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Owner whose plan changes
    #[arg(long)]
    user_uuid: Uuid,

    /// New plan: free, pro or business
    #[arg(long)]
    plan: Plan,
}

pub(crate) async fn run(args: SetPlanArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.connect().await?);

    let (user, changes) = service
        .set_plan(UserUuid::from_uuid(args.user_uuid), args.plan)
        .await
        .map_err(|error| format!("failed to set plan: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("plan: {}", user.plan);
    print_status_changes(&changes);

    Ok(())
}
