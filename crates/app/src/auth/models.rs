//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use zeroize::Zeroizing;

use crate::{
    auth::ApiTokenVersion,
    domain::tenants::records::{TenantStatus, TenantUuid},
    uuids::TypedUuid,
};

pub type ApiTokenUuid = TypedUuid<ApiTokenMetadata>;

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    /// Tenant that owns this API token.
    pub tenant_uuid: TenantUuid,

    /// OpenBao HMAC verifier for the token secret material.
    pub token_hash: String,

    pub tenant_status: TenantStatus,

    pub tenant_deleted: bool,
}

impl ActiveApiToken {
    /// Whether the owning tenant may currently use the API.
    pub(crate) fn tenant_can_serve(&self) -> bool {
        self.tenant_status == TenantStatus::Active && !self.tenant_deleted
    }
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTokenMetadata {
    pub uuid: ApiTokenUuid,
    pub tenant_uuid: TenantUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: ApiTokenUuid,
    pub tenant_uuid: TenantUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Clone)]
pub struct IssuedApiToken {
    pub token: Zeroizing<String>,
    pub metadata: ApiTokenMetadata,
}

impl fmt::Debug for IssuedApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedApiToken")
            .field("token", &"**redacted**")
            .field("metadata", &self.metadata)
            .finish()
    }
}
