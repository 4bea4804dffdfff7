use clap::Args;
use stampbook_app::{auth::PgAuthRepository, domain::tenants::records::TenantUuid};
use uuid::Uuid;

use crate::cli::{DatabaseArgs, token::print_token};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Only list tokens of this tenant
    #[arg(long)]
    tenant_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let repository = PgAuthRepository::new(args.database.connect().await?);

    let tokens = repository
        .list_api_tokens(args.tenant_uuid.map(TenantUuid::from_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    for token in &tokens {
        print_token(token);
        println!();
    }

    Ok(())
}
