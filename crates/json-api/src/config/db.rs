//! Database Config

use std::fmt;

use clap::Args;

/// Database settings.
#[derive(Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for the RLS-bound runtime role
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

impl DatabaseConfig {
    /// Connection string with any password replaced, safe to log.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        redact_password(&self.database_url)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database_url", &self.redacted_url())
            .finish()
    }
}

fn redact_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_owned();
    };

    let Some((userinfo, host)) = rest.split_once('@') else {
        return url.to_owned();
    };

    match userinfo.split_once(':') {
        Some((user, _password)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_owned(),
    }
}
