//! Bearer token wire format and HMAC verifier input.
//!
//! Tokens look like `sb_v1_<token uuid, simple form>.<64 hex secret chars>`.
//! Only the HMAC of the verifier input is stored; the raw token is shown once.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use crate::{auth::models::ApiTokenUuid, domain::tenants::records::TenantUuid};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sb";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    /// Version as stored in `api_tokens.version`.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Random token secret, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    /// Fresh secret from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = Self([0_u8; API_TOKEN_SECRET_BYTES]);

        OsRng.fill_bytes(&mut secret.0);

        secret
    }

    /// Decode exactly 64 hex characters, either case.
    ///
    /// # Errors
    ///
    /// Returns [`ApiTokenError::InvalidSecretEncoding`] for any other input.
    pub fn from_hex(encoded: &str) -> Result<Self, ApiTokenError> {
        if encoded.len() != API_TOKEN_SECRET_HEX_CHARS {
            return Err(ApiTokenError::InvalidSecretEncoding);
        }

        let mut secret = Self([0_u8; API_TOKEN_SECRET_BYTES]);

        for (byte, pair) in secret.0.iter_mut().zip(encoded.as_bytes().chunks_exact(2)) {
            let &[hi, lo] = pair else {
                return Err(ApiTokenError::InvalidSecretEncoding);
            };

            *byte = (hex_value(hi)? << 4) | hex_value(lo)?;
        }

        Ok(secret)
    }

    fn to_hex(&self) -> Zeroizing<String> {
        let mut encoded = Zeroizing::new(String::with_capacity(API_TOKEN_SECRET_HEX_CHARS));

        for byte in self.0 {
            // Writing to a String cannot fail.
            _ = write!(encoded, "{byte:02x}");
        }

        encoded
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token split into its parts.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub token_uuid: ApiTokenUuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

impl ApiToken {
    /// Mint a new current-version token with a random secret.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            token_uuid: ApiTokenUuid::new(),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::generate(),
        }
    }

    /// The raw token as handed to the client.
    #[must_use]
    pub fn expose(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "{API_TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.token_uuid.into_uuid().simple(),
            self.secret.to_hex().as_str()
        ))
    }

    /// HMAC input binding this token to `tenant_uuid`:
    /// `{token_uuid}:{version}:{tenant_uuid}:{secret_hex}`, uuids in simple form.
    #[must_use]
    pub fn verifier_input(&self, tenant_uuid: TenantUuid) -> Zeroizing<Vec<u8>> {
        let input = Zeroizing::new(format!(
            "{}:{}:{}:{}",
            self.token_uuid.into_uuid().simple(),
            self.version.as_i16(),
            tenant_uuid.into_uuid().simple(),
            self.secret.to_hex().as_str(),
        ));

        Zeroizing::new(input.as_bytes().to_vec())
    }
}

impl FromStr for ApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (id, secret_hex) = token
            .trim()
            .split_once('.')
            .ok_or(ApiTokenError::InvalidFormat)?;

        let mut segments = id.splitn(3, '_');

        let (Some(API_TOKEN_PREFIX), Some(version), Some(token_uuid)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(ApiTokenError::InvalidFormat);
        };

        let version = version.parse::<ApiTokenVersion>()?;

        let token_uuid =
            Uuid::try_parse(token_uuid).map_err(|_invalid| ApiTokenError::InvalidFormat)?;

        Ok(Self {
            token_uuid: ApiTokenUuid::from_uuid(token_uuid),
            version,
            secret: ApiTokenSecret::from_hex(secret_hex)?,
        })
    }
}

fn hex_value(digit: u8) -> Result<u8, ApiTokenError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(ApiTokenError::InvalidSecretEncoding),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_of(raw: &str) -> Result<ApiTokenVersion, ApiTokenError> {
        raw.parse::<ApiToken>().map(|token| token.version)
    }

    #[test]
    fn exposed_token_parses_back() -> Result<(), ApiTokenError> {
        let token = ApiToken::generate();
        let raw = token.expose();

        assert!(raw.starts_with("sb_v1_"), "unexpected token prefix: {}", *raw);

        let parsed = raw.parse::<ApiToken>()?;

        assert_eq!(parsed.token_uuid, token.token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret, token.secret);

        Ok(())
    }

    #[test]
    fn secret_hex_is_lower_case_and_accepts_upper() -> Result<(), ApiTokenError> {
        let secret = ApiTokenSecret::from_bytes([0xAF; API_TOKEN_SECRET_BYTES]);

        assert_eq!(secret.to_hex().as_str(), "af".repeat(API_TOKEN_SECRET_BYTES));
        assert_eq!(ApiTokenSecret::from_hex(&"AF".repeat(32))?, secret);

        Ok(())
    }

    #[test]
    fn generated_secrets_differ() {
        assert_ne!(ApiTokenSecret::generate(), ApiTokenSecret::generate());
    }

    #[test]
    fn parse_rejects_foreign_prefix() {
        let raw = format!("lt_v1_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert_eq!(version_of(&raw), Err(ApiTokenError::InvalidFormat));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let raw = format!("sb_v9_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert_eq!(version_of(&raw), Err(ApiTokenError::UnsupportedVersion));
    }

    #[test]
    fn parse_rejects_bad_secret() {
        let short = format!("sb_v1_{}.{}", Uuid::nil().simple(), "ab".repeat(31));
        let non_hex = format!("sb_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        for raw in [short, non_hex] {
            assert_eq!(
                version_of(&raw),
                Err(ApiTokenError::InvalidSecretEncoding),
                "token {raw} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert_eq!(version_of("sb_v1_nothing"), Err(ApiTokenError::InvalidFormat));
        assert_eq!(version_of(""), Err(ApiTokenError::InvalidFormat));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let token = ApiToken::generate();

        let debug = format!("{token:?}");

        assert!(debug.contains("**redacted**"), "got {debug}");
        assert!(
            !debug.contains(token.secret.to_hex().as_str()),
            "secret leaked: {debug}"
        );
    }

    #[test]
    fn verifier_input_binds_tenant() {
        let token = ApiToken {
            token_uuid: ApiTokenUuid::from_uuid(Uuid::nil()),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]),
        };

        let tenant_a = TenantUuid::new();
        let tenant_b = TenantUuid::new();

        assert_eq!(
            token.verifier_input(tenant_a),
            token.verifier_input(tenant_a),
            "verifier input must be deterministic"
        );
        assert_ne!(
            token.verifier_input(tenant_a),
            token.verifier_input(tenant_b),
            "verifier input must depend on the tenant"
        );
    }
}
