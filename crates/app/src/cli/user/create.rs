use clap::Args;
use stampbook_app::domain::users::{
    PgUsersService, UsersService,
    data::NewUser,
    records::{Plan, UserUuid},
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Owner email address
    #[arg(long)]
    email: String,

    /// Owner display name
    #[arg(long)]
    name: String,

    /// Subscription plan: free, pro or business
    #[arg(long, default_value_t = Plan::Free)]
    plan: Plan,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.connect().await?);

    let user = service
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            email: args.email,
            name: args.name,
            plan: args.plan,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("plan: {}", user.plan);

    Ok(())
}
