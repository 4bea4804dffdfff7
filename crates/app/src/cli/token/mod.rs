use clap::{Args, Subcommand};
use stampbook_app::auth::ApiTokenMetadata;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(create::CreateTokenArgs),
    List(list::ListTokensArgs),
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

fn print_token(token: &ApiTokenMetadata) {
    println!("token_uuid: {}", token.uuid);
    println!("tenant_uuid: {}", token.tenant_uuid);
    println!("token_version: {}", token.version.as_i16());
    println!("created_at: {}", token.created_at);
    println!(
        "last_used_at: {}",
        token
            .last_used_at
            .map_or_else(|| "never".to_string(), |value| value.to_string())
    );
    println!(
        "expires_at: {}",
        token
            .expires_at
            .map_or_else(|| "none".to_string(), |value| value.to_string())
    );
    println!(
        "revoked_at: {}",
        token
            .revoked_at
            .map_or_else(|| "active".to_string(), |value| value.to_string())
    );
}
