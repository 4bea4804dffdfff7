//! Auth Config

use std::fmt;

use clap::Args;
use zeroize::Zeroizing;

use stampbook_app::auth::OpenBaoConfig;

/// `OpenBao` Transit settings used to verify API token HMACs.
#[derive(Args)]
pub struct AuthConfig {
    /// `OpenBao` server address
    #[arg(long, env = "OPENBAO_ADDR")]
    pub addr: String,

    /// `OpenBao` authentication token
    #[arg(long, env = "OPENBAO_TOKEN", hide_env_values = true)]
    pub token: String,

    /// `OpenBao` Transit key name
    #[arg(long, env = "OPENBAO_TRANSIT_KEY")]
    pub transit_key: String,
}

impl AuthConfig {
    /// Hand the settings to the `OpenBao` client; the token is zeroized on drop from here on.
    #[must_use]
    pub fn into_openbao_config(self) -> OpenBaoConfig {
        OpenBaoConfig {
            addr: self.addr,
            token: Zeroizing::new(self.token),
            transit_key: self.transit_key,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("addr", &self.addr)
            .field("token", &"<redacted>")
            .field("transit_key", &self.transit_key)
            .finish()
    }
}
