use clap::Args;
use stampbook_app::database::{ensure_app_role, grant_app_role};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative connection; needs CREATEROLE and ownership of the schema
    #[command(flatten)]
    database: DatabaseArgs,

    /// Application runtime role name
    #[arg(long, default_value = "stampbook_app")]
    role_name: String,

    /// Application role password
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = args.database.connect().await?;

    ensure_app_role(&pool, &args.role_name, &args.password)
        .await
        .map_err(|error| format!("failed to create/update role: {error}"))?;

    grant_app_role(&pool, &args.role_name)
        .await
        .map_err(|error| format!("failed to apply grants: {error}"))?;

    println!("ensured app role: {}", args.role_name);
    println!("applied grants for current database and public schema");

    Ok(())
}
