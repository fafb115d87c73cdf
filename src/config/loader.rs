//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 传统环境变量（PORT、GOOGLE_CREDENTIALS_JSON 等）
//! 2. `SPEAK_` 前缀环境变量
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 传统环境变量及其对应的配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("GOOGLE_CREDENTIALS_JSON", "tts.credentials_json"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "tts.application_credentials"),
    ("ENABLE_WAVENET", "tts.enable_wavenet"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `PORT=8080`
/// - `GOOGLE_CREDENTIALS_JSON='{"type":"service_account",...}'`
/// - `ENABLE_WAVENET=false`
/// - `SPEAK_TTS__TIMEOUT_SECS=30`
/// - `SPEAK_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(config_path, |name| std::env::var(name).ok())
}

fn build_config<F>(config_path: Option<&Path>, legacy_env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    // 1. 默认值
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("tts.enable_wavenet", "true")?
        .set_default("tts.endpoint", "https://texttospeech.googleapis.com")?
        .set_default("tts.timeout_secs", 0)?
        .set_default("tts.metadata_endpoint", "http://metadata.google.internal")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量，例如: SPEAK_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("SPEAK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 传统环境变量（最高优先级）
    for &(env_name, key) in LEGACY_ENV_KEYS {
        builder = builder.set_override_option(key, legacy_env(env_name))?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS endpoint cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("TTS Endpoint: {}", config.tts.endpoint);
    tracing::info!(
        "TTS Inline Credentials: {}",
        if config.tts.credentials_json.is_some() { "set" } else { "unset" }
    );
    if let Some(path) = &config.tts.application_credentials {
        tracing::info!("TTS Credentials File: {}", path.display());
    }
    tracing::info!("TTS Metadata Server: {}", config.tts.metadata_endpoint);
    tracing::info!("WaveNet Enabled: {}", config.tts.wavenet_enabled());
    if config.tts.timeout_secs > 0 {
        tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    } else {
        tracing::info!("TTS Timeout: none");
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
