//! User Data

use crate::domain::users::records::{Plan, UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Contact and login email; stored trimmed and lower-cased.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Initial subscription plan.
    pub plan: Plan,
}

/// Trim and lower-case an email address.
#[must_use]
pub fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}
