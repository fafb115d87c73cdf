//! Google TTS Client - 调用 Google Cloud Text-to-Speech REST API
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 TTS API:
//! POST https://texttospeech.googleapis.com/v1/text:synthesize
//! Request: {"input": {"text": "..."}, "voice": {...}, "audioConfig": {"audioEncoding": "MP3"}}
//! Response: {"audioContent": "<base64>"}

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::credentials::GoogleCredentials;
use super::token_source::TokenSource;
use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};
use crate::domain::voice::{AudioEncoding, VoiceGender};

pub const DEFAULT_TTS_ENDPOINT: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    ssml_gender: &'a VoiceGender,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeSpeechResponse {
    #[serde(default)]
    audio_content: String,
}

/// Google API 错误信封: {"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// REST 服务基础 URL
    pub endpoint: String,
    /// 请求超时时间（秒），0 表示不设超时
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            timeout_secs: 0,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
    tokens: TokenSource,
}

impl GoogleTtsClient {
    pub fn new(
        config: GoogleTtsClientConfig,
        credentials: GoogleCredentials,
    ) -> Result<Self, SynthesisError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        let tokens = TokenSource::new(client.clone(), credentials);

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    fn synthesize_url(&self) -> String {
        format!(
            "{}/v1/text:synthesize",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SpeechSynthesizerPort for GoogleTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError> {
        let token = self.tokens.token().await?;

        let body = SynthesizeSpeechRequest {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelectionParams {
                language_code: &request.voice.language_code,
                ssml_gender: &request.voice.ssml_gender,
                name: &request.voice.name,
            },
            audio_config: AudioConfig {
                audio_encoding: request.audio_encoding,
            },
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = request.text.len(),
            voice = %request.voice.name,
            "Sending synthesize request"
        );

        let mut http_request = self.client.post(self.synthesize_url()).bearer_auth(token);
        if let Some(project) = self.tokens.credentials().quota_project_id() {
            http_request = http_request.header("x-goog-user-project", project);
        }

        let response = http_request.json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                SynthesisError::Timeout
            } else if e.is_connect() {
                SynthesisError::Network(format!("Cannot connect to TTS service: {}", e))
            } else {
                SynthesisError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<GoogleErrorEnvelope>(&error_text) {
                Ok(envelope) => {
                    tracing::debug!(
                        status = ?envelope.error.status,
                        "TTS service returned an error envelope"
                    );
                    envelope.error.message
                }
                Err(_) => format!("HTTP {}: {}", status, error_text),
            };
            return Err(SynthesisError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: SynthesizeSpeechResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        let audio_content = base64::engine::general_purpose::STANDARD
            .decode(body.audio_content.as_bytes())
            .map_err(|e| SynthesisError::InvalidResponse(format!("Invalid audioContent: {}", e)))?;

        Ok(SynthesisResponse { audio_content })
    }

    fn name(&self) -> &str {
        "google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::VoiceParams;
    use crate::infrastructure::adapters::tts::credentials::{AuthorizedUserKey, ServiceAccountKey};
    use crate::infrastructure::adapters::tts::metadata_server::MetadataServer;
    use crate::infrastructure::adapters::tts::token_source::CLOUD_PLATFORM_SCOPE;
    use axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
        response::IntoResponse,
        routing::{get, post},
        Form, Json, Router,
    };
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    /// 模拟 token 端点和 text:synthesize 端点
    #[derive(Default)]
    struct MockGoogle {
        token_calls: AtomicUsize,
        token_forms: Mutex<Vec<HashMap<String, String>>>,
        failure: Option<(u16, String)>,
        seen: Mutex<Vec<(String, HeaderMap, serde_json::Value)>>,
    }

    fn token_body() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "access_token": "test-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        }))
    }

    async fn token_handler(
        State(mock): State<Arc<MockGoogle>>,
        Form(form): Form<HashMap<String, String>>,
    ) -> impl IntoResponse {
        mock.token_calls.fetch_add(1, Ordering::SeqCst);
        mock.token_forms.lock().unwrap().push(form);
        token_body()
    }

    async fn metadata_token_handler(
        State(mock): State<Arc<MockGoogle>>,
        headers: HeaderMap,
    ) -> axum::response::Response {
        if !headers.get("metadata-flavor").is_some_and(|v| v == "Google") {
            return StatusCode::FORBIDDEN.into_response();
        }
        mock.token_calls.fetch_add(1, Ordering::SeqCst);
        token_body().into_response()
    }

    async fn synthesize_handler(
        State(mock): State<Arc<MockGoogle>>,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> axum::response::Response {
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
        mock.seen
            .lock()
            .unwrap()
            .push((uri.path().to_string(), headers, json));

        match &mock.failure {
            Some((status, body)) => (
                StatusCode::from_u16(*status).unwrap(),
                body.clone(),
            )
                .into_response(),
            None => Json(serde_json::json!({
                "audioContent": base64::engine::general_purpose::STANDARD.encode(b"ID3-mp3-bytes")
            }))
            .into_response(),
        }
    }

    async fn start_mock(mock: Arc<MockGoogle>) -> SocketAddr {
        let app = Router::new()
            .route("/token", post(token_handler))
            .route(
                "/computeMetadata/v1/instance/service-accounts/default/token",
                get(metadata_token_handler),
            )
            .fallback(synthesize_handler)
            .with_state(mock);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_with(addr: SocketAddr, credentials: GoogleCredentials) -> GoogleTtsClient {
        GoogleTtsClient::new(
            GoogleTtsClientConfig::new(format!("http://{}/", addr)).with_timeout(10),
            credentials,
        )
        .unwrap()
    }

    fn client_for(addr: SocketAddr, quota_project_id: Option<&str>) -> GoogleTtsClient {
        let credentials = GoogleCredentials::AuthorizedUser(AuthorizedUserKey {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
            quota_project_id: quota_project_id.map(str::to_string),
            token_uri: format!("http://{}/token", addr),
        });
        client_with(addr, credentials)
    }

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            text: "Hello".to_string(),
            voice: VoiceParams {
                language_code: "en-IN".to_string(),
                ssml_gender: VoiceGender::Female,
                name: "en-IN-Wavenet-D".to_string(),
            },
            audio_encoding: AudioEncoding::Mp3,
        }
    }

    #[test]
    fn test_config_default() {
        let config = GoogleTtsClientConfig::default();
        assert_eq!(config.endpoint, "https://texttospeech.googleapis.com");
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = GoogleTtsClientConfig::new("http://example.com:9000").with_timeout(60);
        assert_eq!(config.endpoint, "http://example.com:9000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[tokio::test]
    async fn test_synthesize_success() {
        let mock = Arc::new(MockGoogle::default());
        let addr = start_mock(mock.clone()).await;
        let client = client_for(addr, Some("billing-project"));

        let response = client.synthesize(request()).await.unwrap();
        assert_eq!(response.audio_content, b"ID3-mp3-bytes");

        let seen = mock.seen.lock().unwrap();
        let (path, headers, body) = &seen[0];
        assert_eq!(path, "/v1/text:synthesize");
        assert_eq!(headers["authorization"], "Bearer test-token");
        assert_eq!(headers["x-goog-user-project"], "billing-project");
        assert_eq!(
            body,
            &serde_json::json!({
                "input": {"text": "Hello"},
                "voice": {"languageCode": "en-IN", "ssmlGender": "FEMALE", "name": "en-IN-Wavenet-D"},
                "audioConfig": {"audioEncoding": "MP3"}
            })
        );
    }

    #[tokio::test]
    async fn test_refresh_token_grant_form() {
        let mock = Arc::new(MockGoogle::default());
        let addr = start_mock(mock.clone()).await;
        let client = client_for(addr, None);

        client.synthesize(request()).await.unwrap();

        let forms = mock.token_forms.lock().unwrap();
        assert_eq!(forms[0]["grant_type"], "refresh_token");
        assert_eq!(forms[0]["client_id"], "client");
        assert_eq!(forms[0]["client_secret"], "secret");
        assert_eq!(forms[0]["refresh_token"], "refresh");
    }

    #[tokio::test]
    async fn test_service_account_jwt_bearer_grant() {
        #[derive(serde::Deserialize)]
        struct Claims {
            iss: String,
            scope: String,
        }

        let mock = Arc::new(MockGoogle::default());
        let addr = start_mock(mock.clone()).await;
        let token_uri = format!("http://{}/token", addr);
        let credentials = GoogleCredentials::ServiceAccount(ServiceAccountKey {
            client_email: "tts@demo-project.iam.gserviceaccount.com".to_string(),
            private_key: include_str!("testdata/service_account_key.pem").to_string(),
            private_key_id: Some("test-key-1".to_string()),
            project_id: Some("demo-project".to_string()),
            token_uri: token_uri.clone(),
        });
        let client = client_with(addr, credentials);

        let response = client.synthesize(request()).await.unwrap();
        assert_eq!(response.audio_content, b"ID3-mp3-bytes");

        let forms = mock.token_forms.lock().unwrap();
        assert_eq!(
            forms[0]["grant_type"],
            "urn:ietf:params:oauth:grant-type:jwt-bearer"
        );

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[token_uri.as_str()]);
        let public_key =
            DecodingKey::from_rsa_pem(include_bytes!("testdata/service_account_key.pub.pem"))
                .unwrap();
        let claims = decode::<Claims>(&forms[0]["assertion"], &public_key, &validation)
            .unwrap()
            .claims;
        assert_eq!(claims.iss, "tts@demo-project.iam.gserviceaccount.com");
        assert_eq!(claims.scope, CLOUD_PLATFORM_SCOPE);

        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen[0].1["authorization"], "Bearer test-token");
    }

    #[tokio::test]
    async fn test_metadata_server_credentials() {
        let mock = Arc::new(MockGoogle::default());
        let addr = start_mock(mock.clone()).await;
        let credentials =
            GoogleCredentials::MetadataServer(MetadataServer::new(format!("http://{}", addr)));
        let client = client_with(addr, credentials);

        let response = client.synthesize(request()).await.unwrap();
        assert_eq!(response.audio_content, b"ID3-mp3-bytes");
        assert_eq!(mock.token_calls.load(Ordering::SeqCst), 1);

        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen[0].1["authorization"], "Bearer test-token");
        assert!(seen[0].1.get("x-goog-user-project").is_none());
    }

    #[tokio::test]
    async fn test_access_token_is_reused() {
        let mock = Arc::new(MockGoogle::default());
        let addr = start_mock(mock.clone()).await;
        let client = client_for(addr, None);

        client.synthesize(request()).await.unwrap();
        client.synthesize(request()).await.unwrap();

        assert_eq!(mock.token_calls.load(Ordering::SeqCst), 1);
        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].1.get("x-goog-user-project").is_none());
    }

    #[tokio::test]
    async fn test_error_envelope_message_is_surfaced() {
        let mock = Arc::new(MockGoogle {
            failure: Some((
                429,
                r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#
                    .to_string(),
            )),
            ..Default::default()
        });
        let addr = start_mock(mock).await;
        let client = client_for(addr, None);

        let err = client.synthesize(request()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Service { status: 429, .. }));
        assert_eq!(err.to_string(), "Quota exceeded");
    }

    #[tokio::test]
    async fn test_non_json_error_keeps_status_and_body() {
        let mock = Arc::new(MockGoogle {
            failure: Some((502, "bad gateway".to_string())),
            ..Default::default()
        });
        let addr = start_mock(mock).await;
        let client = client_for(addr, None);

        let err = client.synthesize(request()).await.unwrap_err();
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint_is_auth_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(addr, None);
        let err = client.synthesize(request()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Auth(_)));
    }
}
