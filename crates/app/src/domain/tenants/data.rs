//! Tenant Data

use crate::domain::{tenants::records::TenantUuid, users::records::UserUuid};

const MIN_SLUG_LEN: usize = 3;
const MAX_SLUG_LEN: usize = 63;

/// New Tenant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    /// UUID to assign to the tenant row.
    pub uuid: TenantUuid,

    /// Owner of the new tenant.
    pub owner_uuid: UserUuid,

    /// Tenant name to persist.
    pub name: String,

    /// Public identifier used in customer-facing URLs.
    pub slug: String,
}

/// Check a tenant slug: lower-case ASCII letters, digits and single hyphens,
/// 3 to 63 characters, no leading or trailing hyphen.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    if !(MIN_SLUG_LEN..=MAX_SLUG_LEN).contains(&slug.len()) {
        return false;
    }

    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }

    slug.bytes()
        .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_slugs() {
        assert!(is_valid_slug("corner-cafe"));
        assert!(is_valid_slug("cafe42"));
        assert!(is_valid_slug("abc"));
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(!is_valid_slug("ab"));
        assert!(!is_valid_slug(&"a".repeat(64)));
        assert!(is_valid_slug(&"a".repeat(63)));
    }

    #[test]
    fn rejects_bad_characters() {
        assert!(!is_valid_slug("Corner-Cafe"));
        assert!(!is_valid_slug("corner_cafe"));
        assert!(!is_valid_slug("corner cafe"));
        assert!(!is_valid_slug("café"));
    }

    #[test]
    fn rejects_misplaced_hyphens() {
        assert!(!is_valid_slug("-cafe"));
        assert!(!is_valid_slug("cafe-"));
        assert!(!is_valid_slug("corner--cafe"));
    }
}
