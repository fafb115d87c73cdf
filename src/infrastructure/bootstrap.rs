//! Synthesizer Bootstrap
//!
//! 启动时构建唯一的合成客户端：
//! 1. 配置了内联 JSON 凭证 -> 解析并使用
//! 2. 否则按 Application Default Credentials 规则发现凭证文件
//! 3. 没有任何凭证文件时探测 GCE 元数据服务器
//!
//! 任何失败都只记录日志并返回 None，进程照常启动

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::SpeechSynthesizerPort;
use crate::config::TtsConfig;
use crate::infrastructure::adapters::{
    well_known_file, CredentialError, GoogleCredentials, GoogleTtsClient, GoogleTtsClientConfig,
    MetadataServer,
};

/// 凭证来源
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    InlineJson,
    File(PathBuf),
    MetadataServer(String),
}

/// 构建合成客户端，失败时返回 None
pub async fn init_synthesizer(config: &TtsConfig) -> Option<Arc<dyn SpeechSynthesizerPort>> {
    let (credentials, source) = match load_credentials(config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize TTS Client");
            return None;
        }
    };

    let client_config =
        GoogleTtsClientConfig::new(config.endpoint.clone()).with_timeout(config.timeout_secs);

    match GoogleTtsClient::new(client_config, credentials.clone()) {
        Ok(client) => {
            match &source {
                CredentialSource::InlineJson => tracing::info!(
                    kind = credentials.kind(),
                    "TTS Client initialized with env JSON credentials."
                ),
                CredentialSource::File(path) => tracing::info!(
                    kind = credentials.kind(),
                    path = %path.display(),
                    "TTS Client initialized with default credentials."
                ),
                CredentialSource::MetadataServer(endpoint) => tracing::info!(
                    kind = credentials.kind(),
                    endpoint = %endpoint,
                    "TTS Client initialized with default credentials."
                ),
            }
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize TTS Client");
            None
        }
    }
}

/// 按优先级加载凭证
pub async fn load_credentials(
    config: &TtsConfig,
) -> Result<(GoogleCredentials, CredentialSource), CredentialError> {
    resolve_credentials(config, well_known_file()).await
}

async fn resolve_credentials(
    config: &TtsConfig,
    well_known: Option<PathBuf>,
) -> Result<(GoogleCredentials, CredentialSource), CredentialError> {
    if let Some(json) = config.credentials_json.as_deref().filter(|json| !json.is_empty()) {
        let credentials = GoogleCredentials::from_json(json)?;
        return Ok((credentials, CredentialSource::InlineJson));
    }

    match GoogleCredentials::discover(config.application_credentials.as_deref(), well_known) {
        Ok((credentials, path)) => Ok((credentials, CredentialSource::File(path))),
        Err(CredentialError::NotFound) => {
            let server = MetadataServer::new(config.metadata_endpoint.clone());
            if server.probe(&reqwest::Client::new()).await {
                let endpoint = server.endpoint().to_string();
                Ok((
                    GoogleCredentials::MetadataServer(server),
                    CredentialSource::MetadataServer(endpoint),
                ))
            } else {
                Err(CredentialError::NotFound)
            }
        }
        Err(e) => Err(e),
    }
}
