//! Notification Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

pub type NotificationUuid = TypedUuid<NotificationRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    StampsEarned,
    StampsRedeemed,
    RewardUnlocked,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StampsEarned => "stamps_earned",
            Self::StampsRedeemed => "stamps_redeemed",
            Self::RewardUnlocked => "reward_unlocked",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown notification kind `{0}`")]
pub struct UnknownNotificationKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stamps_earned" => Ok(Self::StampsEarned),
            "stamps_redeemed" => Ok(Self::StampsRedeemed),
            "reward_unlocked" => Ok(Self::RewardUnlocked),
            other => Err(UnknownNotificationKind(other.to_string())),
        }
    }
}

/// Notification Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub kind: NotificationKind,
    pub message: String,
    pub customer_uuid: Option<CustomerUuid>,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl NotificationRecord {
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_stored_text() {
        for kind in [
            NotificationKind::StampsEarned,
            NotificationKind::StampsRedeemed,
            NotificationKind::RewardUnlocked,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "birthday".parse::<NotificationKind>(),
            Err(UnknownNotificationKind("birthday".to_string()))
        );
    }
}
