//! Google Credentials - 凭证文档解析与发现
//!
//! 支持两种凭证文档：
//! - `service_account`: 服务账号私钥（JWT bearer 换取 access token）
//! - `authorized_user`: gcloud 用户凭证（refresh token 换取 access token）
//!
//! 另有不来自文档的 `MetadataServer`：由启动探测得到

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::metadata_server::MetadataServer;

/// Google OAuth2 token 端点
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// 凭证错误
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to parse credentials JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No application default credentials found")]
    NotFound,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// 服务账号凭证
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// gcloud 用户凭证
#[derive(Clone, Deserialize)]
pub struct AuthorizedUserKey {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default)]
    pub quota_project_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for AuthorizedUserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedUserKey")
            .field("client_id", &self.client_id)
            .field("quota_project_id", &self.quota_project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Google 凭证文档
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoogleCredentials {
    ServiceAccount(ServiceAccountKey),
    AuthorizedUser(AuthorizedUserKey),
    #[serde(skip)]
    MetadataServer(MetadataServer),
}

impl GoogleCredentials {
    /// 解析内联 JSON 文档
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 读取并解析凭证文件
    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let json = std::fs::read_to_string(path).map_err(|source| CredentialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// 按 Application Default Credentials 的顺序发现凭证文件
    ///
    /// 1. 显式配置的路径（GOOGLE_APPLICATION_CREDENTIALS）
    /// 2. gcloud 的 well-known 文件
    ///
    /// 返回凭证及其来源路径
    ///
    /// 都没有时返回 `NotFound`，由调用方决定是否继续探测元数据服务器。
    /// `well_known` 通常是 [`well_known_file`] 的结果
    pub fn discover(
        explicit_path: Option<&Path>,
        well_known: Option<PathBuf>,
    ) -> Result<(Self, PathBuf), CredentialError> {
        if let Some(path) = explicit_path {
            return Ok((Self::from_file(path)?, path.to_path_buf()));
        }

        match well_known {
            Some(path) if path.is_file() => Ok((Self::from_file(&path)?, path)),
            _ => Err(CredentialError::NotFound),
        }
    }

    pub fn token_uri(&self) -> &str {
        match self {
            Self::ServiceAccount(key) => &key.token_uri,
            Self::AuthorizedUser(key) => &key.token_uri,
            Self::MetadataServer(server) => server.token_url(),
        }
    }

    /// 计费项目（仅用户凭证需要通过 header 指定）
    pub fn quota_project_id(&self) -> Option<&str> {
        match self {
            Self::ServiceAccount(_) | Self::MetadataServer(_) => None,
            Self::AuthorizedUser(key) => key.quota_project_id.as_deref(),
        }
    }

    /// 凭证类型（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServiceAccount(_) => "service_account",
            Self::AuthorizedUser(_) => "authorized_user",
            Self::MetadataServer(_) => "compute_metadata",
        }
    }
}

/// gcloud `auth application-default login` 写入的文件
pub fn well_known_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join("gcloud")
            .join("application_default_credentials.json")
    })
}
