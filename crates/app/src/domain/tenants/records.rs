//! Tenant Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Tenant UUID
pub type TenantUuid = TypedUuid<TenantRecord>;

/// Whether a tenant may currently serve traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenantStatus {
    Active,
    Suspended,
}

impl TenantStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown tenant status `{0}`")]
pub struct UnknownTenantStatus(pub String);

impl FromStr for TenantStatus {
    type Err = UnknownTenantStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            other => Err(UnknownTenantStatus(other.to_string())),
        }
    }
}

/// Tenant Record
#[derive(Debug, Clone)]
pub struct TenantRecord {
    /// Unique tenant identifier.
    pub uuid: TenantUuid,

    /// Owning user.
    pub owner_uuid: UserUuid,

    /// Human-readable tenant name.
    pub name: String,

    /// Public identifier used in customer-facing URLs.
    pub slug: String,

    /// Current plan-enforced status.
    pub status: TenantStatus,

    /// Tenant creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,

    /// Soft-delete timestamp when deleted.
    pub deleted_at: Option<Timestamp>,
}
