//! OpenBao Transit client for token verifier HMACs.

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use zeroize::Zeroizing;

/// Configuration for connecting to an OpenBao instance.
#[derive(Clone)]
pub struct OpenBaoConfig {
    /// OpenBao server address, e.g. `"http://localhost:8200"`.
    pub addr: String,

    /// OpenBao authentication token.
    pub token: Zeroizing<String>,

    /// Transit key name to use for HMAC operations.
    pub transit_key: String,
}

impl std::fmt::Debug for OpenBaoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenBaoConfig")
            .field("addr", &self.addr)
            .field("token", &"**redacted**")
            .field("transit_key", &self.transit_key)
            .finish()
    }
}

/// Computes and checks the stored verifier for API token secrets.
#[automock]
#[async_trait]
pub trait TokenHasher: Send + Sync {
    /// Opaque verifier for `input`, suitable for storage.
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError>;

    /// Whether `input` matches a previously stored verifier.
    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError>;
}

/// HTTP client for OpenBao Transit HMAC operations.
#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

/// Upper bound on a single Transit call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

impl OpenBaoClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, operation: TransitOperation) -> String {
        format!(
            "{}/v1/transit/{}/{}",
            self.config.addr.trim_end_matches('/'),
            operation.as_str(),
            self.config.transit_key
        )
    }

    async fn post<B, T>(&self, operation: TransitOperation, body: &B) -> Result<T, OpenBaoError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(operation))
            .timeout(REQUEST_TIMEOUT)
            .header("X-Vault-Token", self.config.token.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let parsed: TransitResponse<T> = response.json().await?;

            return Ok(parsed.data);
        }

        let detail = response
            .json::<TransitErrors>()
            .await
            .map(|body| body.errors.join("; "))
            .unwrap_or_default();

        Err(OpenBaoError::UnexpectedResponse(format!(
            "transit {} failed with status {status}: {detail}",
            operation.as_str()
        )))
    }
}

#[async_trait]
impl TokenHasher for OpenBaoClient {
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        let data: HmacData = self
            .post(
                TransitOperation::Hmac,
                &HmacRequest {
                    input: Zeroizing::new(BASE64.encode(input)),
                },
            )
            .await?;

        Ok(data.hmac)
    }

    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        let data: VerifyData = self
            .post(
                TransitOperation::Verify,
                &VerifyRequest {
                    input: Zeroizing::new(BASE64.encode(input)),
                    hmac,
                },
            )
            .await?;

        Ok(data.valid)
    }
}

#[derive(Clone, Copy, Debug)]
enum TransitOperation {
    Hmac,
    Verify,
}

impl TransitOperation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Hmac => "hmac",
            Self::Verify => "verify",
        }
    }
}

#[derive(Serialize)]
struct HmacRequest {
    input: Zeroizing<String>,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    input: Zeroizing<String>,
    hmac: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct TransitErrors {
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

/// Errors that can occur when communicating with OpenBao.
#[derive(Debug, Error)]
pub enum OpenBaoError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenBao returned a non-2xx response or unexpected body.
    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}
