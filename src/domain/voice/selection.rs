//! Voice Context - 默认音色选择
//!
//! 调用方未指定音色名时，按 (语言, 性别, WaveNet 开关) 查表

use super::VoiceGender;

/// 唯一单独处理的语言代码，其余语言一律按美式英语处理
pub const INDIAN_ENGLISH: &str = "en-IN";

/// 选择默认音色
///
/// 只有 `Female` 视为女声，其它取值（包括无法识别的）都视为男声
pub fn resolve_voice(language_code: &str, gender: &VoiceGender, wavenet_enabled: bool) -> &'static str {
    let is_indian = language_code == INDIAN_ENGLISH;
    let is_female = gender.is_female();

    match (wavenet_enabled, is_indian, is_female) {
        (true, true, true) => "en-IN-Wavenet-D",
        (true, true, false) => "en-IN-Wavenet-C",
        (true, false, true) => "en-US-Wavenet-F",
        (true, false, false) => "en-US-Wavenet-D",
        (false, true, true) => "en-IN-Standard-D",
        (false, true, false) => "en-IN-Standard-C",
        (false, false, true) => "en-US-Standard-E",
        (false, false, false) => "en-US-Standard-D",
    }
}
