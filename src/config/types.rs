//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Google TTS 配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Google TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 内联的凭证 JSON 文档（优先于文件发现）
    #[serde(default)]
    pub credentials_json: Option<String>,

    /// 凭证文件路径（等价于 GOOGLE_APPLICATION_CREDENTIALS）
    #[serde(default)]
    pub application_credentials: Option<PathBuf>,

    /// WaveNet 开关，只有字面值 "false" 才会关闭
    #[serde(default = "default_enable_wavenet")]
    pub enable_wavenet: String,

    /// Text-to-Speech REST 服务地址
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,

    /// 单次合成请求超时（秒），0 表示不设超时
    #[serde(default)]
    pub timeout_secs: u64,

    /// GCE 元数据服务器地址，没有凭证文件时探测
    #[serde(default = "default_metadata_endpoint")]
    pub metadata_endpoint: String,
}

fn default_enable_wavenet() -> String {
    "true".to_string()
}

fn default_tts_endpoint() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_metadata_endpoint() -> String {
    "http://metadata.google.internal".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            credentials_json: None,
            application_credentials: None,
            enable_wavenet: default_enable_wavenet(),
            endpoint: default_tts_endpoint(),
            timeout_secs: 0,
            metadata_endpoint: default_metadata_endpoint(),
        }
    }
}

impl TtsConfig {
    /// WaveNet 是否启用
    pub fn wavenet_enabled(&self) -> bool {
        self.enable_wavenet != "false"
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
