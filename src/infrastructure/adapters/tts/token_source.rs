//! OAuth2 Token Source
//!
//! 用凭证换取 access token，并在过期前复用
//!
//! 缓存锁在取 token 期间一直持有，所以 token 请求总是带固定超时，
//! 即使合成请求本身不设超时

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::credentials::{GoogleCredentials, ServiceAccountKey};
use super::metadata_server::{METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE};
use crate::application::ports::SynthesisError;

/// Text-to-Speech 需要的 OAuth scope
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// 提前刷新的余量（秒）
const EXPIRY_MARGIN_SECS: i64 = 60;

/// token 请求的默认超时
pub const DEFAULT_TOKEN_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// JWT bearer assertion claims
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Access token 来源
pub struct TokenSource {
    client: Client,
    credentials: GoogleCredentials,
    request_timeout: std::time::Duration,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    pub fn new(client: Client, credentials: GoogleCredentials) -> Self {
        Self {
            client,
            credentials,
            request_timeout: DEFAULT_TOKEN_TIMEOUT,
            cached: Mutex::new(None),
        }
    }

    pub fn with_request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn credentials(&self) -> &GoogleCredentials {
        &self.credentials
    }

    /// 获取有效的 access token，必要时向 token 端点重新申请
    pub async fn token(&self) -> Result<String, SynthesisError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.token.clone());
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    async fn fetch(&self) -> Result<AccessToken, SynthesisError> {
        let token_uri = self.credentials.token_uri();
        let request = match &self.credentials {
            GoogleCredentials::ServiceAccount(key) => self.client.post(token_uri).form(&[
                ("grant_type", JWT_BEARER_GRANT.to_string()),
                ("assertion", sign_assertion(key, Utc::now())?),
            ]),
            GoogleCredentials::AuthorizedUser(key) => self.client.post(token_uri).form(&[
                ("grant_type", "refresh_token"),
                ("client_id", key.client_id.as_str()),
                ("client_secret", key.client_secret.as_str()),
                ("refresh_token", key.refresh_token.as_str()),
            ]),
            GoogleCredentials::MetadataServer(_) => self
                .client
                .get(token_uri)
                .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE),
        };

        tracing::debug!(
            token_uri = %token_uri,
            kind = self.credentials.kind(),
            "Requesting access token"
        );

        let response = request
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else {
                    SynthesisError::Auth(format!("token request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::Auth(format!("invalid token response: {}", e)))?;

        Ok(AccessToken {
            token: body.access_token,
            expires_at: Utc::now() + Duration::seconds(body.expires_in.unwrap_or(3600)),
        })
    }
}

/// 用服务账号私钥签发 RS256 assertion
fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, SynthesisError> {
    let iat = now.timestamp();
    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: CLOUD_PLATFORM_SCOPE,
        aud: &key.token_uri,
        iat,
        exp: iat + 3600,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SynthesisError::Auth(format!("invalid service account private key: {}", e)))?;

    encode(&header, &claims, &encoding_key)
        .map_err(|e| SynthesisError::Auth(format!("failed to sign assertion: {}", e)))
}
