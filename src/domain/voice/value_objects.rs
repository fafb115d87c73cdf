//! Voice Context - Value Objects

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// SSML 音色性别
///
/// 无法识别的取值保存在 `Other` 中，原样转发给 TTS 服务
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VoiceGender {
    #[default]
    Neutral,
    Female,
    Male,
    Other(String),
}

impl VoiceGender {
    pub fn parse(value: &str) -> Self {
        match value {
            "NEUTRAL" => Self::Neutral,
            "FEMALE" => Self::Female,
            "MALE" => Self::Male,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Neutral => "NEUTRAL",
            Self::Female => "FEMALE",
            Self::Male => "MALE",
            Self::Other(value) => value,
        }
    }

    pub fn is_female(&self) -> bool {
        matches!(self, Self::Female)
    }
}

impl std::fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VoiceGender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VoiceGender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// 输出音频编码
///
/// 目前只输出 MP3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    #[default]
    Mp3,
}

impl AudioEncoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse_known_values() {
        assert_eq!(VoiceGender::parse("NEUTRAL"), VoiceGender::Neutral);
        assert_eq!(VoiceGender::parse("FEMALE"), VoiceGender::Female);
        assert_eq!(VoiceGender::parse("MALE"), VoiceGender::Male);
    }

    #[test]
    fn test_gender_keeps_unrecognized_verbatim() {
        let gender = VoiceGender::parse("female");
        assert_eq!(gender, VoiceGender::Other("female".to_string()));
        assert_eq!(gender.as_str(), "female");
        assert!(!gender.is_female());
    }

    #[test]
    fn test_gender_serde_is_plain_string() {
        let gender: VoiceGender = serde_json::from_str("\"FEMALE\"").unwrap();
        assert!(gender.is_female());
        assert_eq!(serde_json::to_string(&VoiceGender::Male).unwrap(), "\"MALE\"");
    }

    #[test]
    fn test_mp3_wire_name_and_content_type() {
        assert_eq!(serde_json::to_string(&AudioEncoding::Mp3).unwrap(), "\"MP3\"");
        assert_eq!(AudioEncoding::Mp3.content_type(), "audio/mpeg");
    }
}
