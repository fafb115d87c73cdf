//! Speak Commands - 语音合成命令

use crate::domain::voice::VoiceGender;

/// 默认语言代码
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// 合成语音命令
///
/// 字段与请求体一一对应，未提供的字段为 None
#[derive(Debug, Clone, Default)]
pub struct SpeakCommand {
    pub text: Option<String>,
    pub language_code: Option<String>,
    pub gender: Option<String>,
    pub voice_name: Option<String>,
}

/// 填充默认值后的合成参数
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakOptions {
    /// 默认 "en-US"
    pub language_code: String,
    /// 默认 NEUTRAL
    pub gender: VoiceGender,
    /// 空字符串视为未指定
    pub voice_name: Option<String>,
}

impl SpeakOptions {
    pub fn resolve(command: &SpeakCommand) -> Self {
        Self {
            language_code: command
                .language_code
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
            gender: command
                .gender
                .as_deref()
                .map(VoiceGender::parse)
                .unwrap_or_default(),
            voice_name: command.voice_name.clone().filter(|name| !name.is_empty()),
        }
    }
}

/// 合成语音响应
#[derive(Debug, Clone)]
pub struct SpeakResponse {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    /// 实际使用的音色
    pub voice_name: String,
}
