use clap::{Args, Subcommand};

mod create;
mod list;
mod set_plan;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(create::CreateUserArgs),
    List(list::ListUsersArgs),
    SetPlan(set_plan::SetPlanArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::List(args) => list::run(args).await,
        UserSubcommand::SetPlan(args) => set_plan::run(args).await,
    }
}
