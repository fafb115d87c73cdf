//! Speech Synthesizer Port - 语音合成抽象
//!
//! 定义远端语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{AudioEncoding, VoiceGender};

/// 合成错误
///
/// `Service` 的 Display 只包含上游返回的 message，直接透传给调用方
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("{0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 音色参数
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceParams {
    pub language_code: String,
    pub ssml_gender: VoiceGender,
    pub name: String,
}

/// 合成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// 要合成的原始文本
    pub text: String,
    pub voice: VoiceParams,
    pub audio_encoding: AudioEncoding,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 编码后的音频数据
    pub audio_content: Vec<u8>,
}

/// Speech Synthesizer Port
///
/// 给定文本与音色，返回音频字节或失败
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError>;

    /// 实现名称，用于日志
    fn name(&self) -> &str;
}
