//! Stamp Transaction Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

pub type StampTransactionUuid = TypedUuid<StampTransactionRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StampTransactionKind {
    Earn,
    Redeem,
}

impl StampTransactionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earn => "EARN",
            Self::Redeem => "REDEEM",
        }
    }
}

impl fmt::Display for StampTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stamp transaction kind `{0}`")]
pub struct UnknownStampTransactionKind(pub String);

impl FromStr for StampTransactionKind {
    type Err = UnknownStampTransactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("earn") {
            Ok(Self::Earn)
        } else if s.eq_ignore_ascii_case("redeem") {
            Ok(Self::Redeem)
        } else {
            Err(UnknownStampTransactionKind(s.to_string()))
        }
    }
}

/// Stamp Transaction Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampTransactionRecord {
    pub uuid: StampTransactionUuid,
    pub customer_uuid: CustomerUuid,
    pub kind: StampTransactionKind,
    pub amount: u32,
    pub balance_after: u32,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stored_upper_case() {
        assert_eq!(StampTransactionKind::Earn.to_string(), "EARN");
        assert_eq!(StampTransactionKind::Redeem.to_string(), "REDEEM");
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("EARN".parse(), Ok(StampTransactionKind::Earn));
        assert_eq!("redeem".parse(), Ok(StampTransactionKind::Redeem));
        assert_eq!(
            "refund".parse::<StampTransactionKind>(),
            Err(UnknownStampTransactionKind("refund".to_string()))
        );
    }
}
