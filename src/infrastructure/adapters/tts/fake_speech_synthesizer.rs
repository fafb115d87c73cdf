//! Fake Speech Synthesizer - 用于测试的合成客户端
//!
//! 始终返回固定的音频或固定的错误，不实际调用 TTS 服务，并记录收到的请求

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};

/// Fake Synthesizer 配置
#[derive(Debug, Clone, Default)]
pub struct FakeSynthesizerConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 设置后每次调用都以该 message 失败
    pub failure: Option<String>,
}

/// Fake Speech Synthesizer
pub struct FakeSpeechSynthesizer {
    config: FakeSynthesizerConfig,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeSpeechSynthesizer {
    pub fn new(config: FakeSynthesizerConfig) -> Self {
        Self {
            config,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 始终返回给定音频
    pub fn returning(audio_data: impl Into<Vec<u8>>) -> Self {
        Self::new(FakeSynthesizerConfig {
            audio_data: audio_data.into(),
            failure: None,
        })
    }

    /// 始终以给定 message 失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(FakeSynthesizerConfig {
            audio_data: Vec::new(),
            failure: Some(message.into()),
        })
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechSynthesizer {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice.name,
            "FakeSpeechSynthesizer: returning fixed result"
        );

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        match &self.config.failure {
            Some(message) => Err(SynthesisError::Service {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(SynthesisResponse {
                audio_content: self.config.audio_data.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}
