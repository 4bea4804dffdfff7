use clap::Args;
use stampbook_app::database::{MIGRATOR, run_migrations};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Administrative connection owning the schema
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    run_migrations(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let latest = MIGRATOR
        .iter()
        .map(|migration| migration.version)
        .max()
        .map_or_else(|| "none".to_string(), |version| version.to_string());

    println!("schema is at migration {latest}");

    Ok(())
}
