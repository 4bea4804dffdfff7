use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use stampbook_app::database;

mod db;
mod tenant;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "stampbook-app", about = "Stampbook admin console", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage tenant owners and their plans
    User(user::UserCommand),
    /// Manage tenants and their plan-driven status
    Tenant(tenant::TenantCommand),
    /// Manage tenant API tokens
    Token(token::TokenCommand),
    /// Database administration
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Tenant(command) => tenant::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
