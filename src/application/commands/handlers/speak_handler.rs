//! Speak Command Handler

use std::sync::Arc;

use crate::application::commands::speak_commands::{SpeakCommand, SpeakOptions, SpeakResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{SpeechSynthesizerPort, SynthesisRequest, VoiceParams};
use crate::domain::voice::{resolve_voice, AudioEncoding};

/// Speak Handler - 校验请求、选择音色并调用远端合成
///
/// `synthesizer` 为 None 表示启动时凭证初始化失败，此时所有请求都返回 500
pub struct SpeakHandler {
    synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>,
    wavenet_enabled: bool,
}

impl SpeakHandler {
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>, wavenet_enabled: bool) -> Self {
        Self {
            synthesizer,
            wavenet_enabled,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.synthesizer.is_some()
    }

    pub async fn handle(&self, command: SpeakCommand) -> Result<SpeakResponse, ApplicationError> {
        let options = SpeakOptions::resolve(&command);

        let text = command
            .text
            .filter(|text| !text.is_empty())
            .ok_or(ApplicationError::MissingField("text"))?;

        let synthesizer = self
            .synthesizer
            .as_ref()
            .ok_or(ApplicationError::ClientNotReady)?;

        let voice_name = match options.voice_name {
            Some(name) => name,
            None => resolve_voice(&options.language_code, &options.gender, self.wavenet_enabled)
                .to_string(),
        };

        let audio_encoding = AudioEncoding::Mp3;
        let request = SynthesisRequest {
            text,
            voice: VoiceParams {
                language_code: options.language_code,
                ssml_gender: options.gender,
                name: voice_name.clone(),
            },
            audio_encoding,
        };

        tracing::debug!(
            synthesizer = synthesizer.name(),
            text_len = request.text.len(),
            language_code = %request.voice.language_code,
            gender = %request.voice.ssml_gender,
            voice = %voice_name,
            "Synthesizing speech"
        );

        let response = synthesizer.synthesize(request).await.map_err(|e| {
            tracing::error!(
                synthesizer = synthesizer.name(),
                voice = %voice_name,
                error = ?e,
                "Error synthesizing speech"
            );
            ApplicationError::from(e)
        })?;

        tracing::info!(
            voice = %voice_name,
            audio_size = response.audio_content.len(),
            "Speech synthesized"
        );

        Ok(SpeakResponse {
            audio_data: response.audio_content,
            content_type: audio_encoding.content_type(),
            voice_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceGender;
    use crate::infrastructure::adapters::FakeSpeechSynthesizer;

    fn handler_with(fake: &Arc<FakeSpeechSynthesizer>, wavenet_enabled: bool) -> SpeakHandler {
        let port: Arc<dyn SpeechSynthesizerPort> = fake.clone();
        SpeakHandler::new(Some(port), wavenet_enabled)
    }

    fn command(text: &str) -> SpeakCommand {
        SpeakCommand {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_default_request_uses_us_wavenet_voice() {
        let fake = Arc::new(FakeSpeechSynthesizer::returning(b"ID3audio".to_vec()));
        let handler = handler_with(&fake, true);

        let response = handler.handle(command("Hello")).await.unwrap();

        assert_eq!(response.voice_name, "en-US-Wavenet-D");
        assert_eq!(response.audio_data, b"ID3audio");
        assert_eq!(response.content_type, "audio/mpeg");

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            SynthesisRequest {
                text: "Hello".to_string(),
                voice: VoiceParams {
                    language_code: "en-US".to_string(),
                    ssml_gender: VoiceGender::Neutral,
                    name: "en-US-Wavenet-D".to_string(),
                },
                audio_encoding: AudioEncoding::Mp3,
            }
        );
    }

    #[tokio::test]
    async fn test_indian_female_with_wavenet_disabled() {
        let fake = Arc::new(FakeSpeechSynthesizer::returning(vec![1, 2, 3]));
        let handler = handler_with(&fake, false);

        let response = handler
            .handle(SpeakCommand {
                text: Some("Hello".to_string()),
                language_code: Some("en-IN".to_string()),
                gender: Some("FEMALE".to_string()),
                voice_name: None,
            })
            .await
            .unwrap();

        assert_eq!(response.voice_name, "en-IN-Standard-D");
        let requests = fake.requests();
        assert_eq!(requests[0].voice.language_code, "en-IN");
        assert_eq!(requests[0].voice.ssml_gender, VoiceGender::Female);
    }

    #[tokio::test]
    async fn test_explicit_voice_name_always_wins() {
        for wavenet in [true, false] {
            for language in [None, Some("en-IN"), Some("en-US"), Some("fr-FR")] {
                for gender in [None, Some("FEMALE"), Some("MALE"), Some("NEUTRAL"), Some("x")] {
                    let fake = Arc::new(FakeSpeechSynthesizer::returning(vec![0]));
                    let handler = handler_with(&fake, wavenet);
                    let response = handler
                        .handle(SpeakCommand {
                            text: Some("Hi".to_string()),
                            language_code: language.map(str::to_string),
                            gender: gender.map(str::to_string),
                            voice_name: Some("custom-Voice-Z".to_string()),
                        })
                        .await
                        .unwrap();

                    assert_eq!(response.voice_name, "custom-Voice-Z");
                    assert_eq!(fake.requests()[0].voice.name, "custom-Voice-Z");
                }
            }
        }
    }

    #[tokio::test]
    async fn test_missing_or_empty_text_never_calls_synthesizer() {
        let fake = Arc::new(FakeSpeechSynthesizer::returning(vec![0]));
        let handler = handler_with(&fake, true);

        for text in [None, Some(String::new())] {
            let err = handler
                .handle(SpeakCommand {
                    text,
                    voice_name: Some("en-US-Wavenet-A".to_string()),
                    ..Default::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ApplicationError::MissingField("text")));
        }

        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_absent_client_is_not_ready() {
        let handler = SpeakHandler::new(None, true);
        assert!(!handler.is_ready());

        let err = handler.handle(command("Hi")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ClientNotReady));
    }

    #[tokio::test]
    async fn test_missing_text_checked_before_client() {
        let handler = SpeakHandler::new(None, true);
        let err = handler.handle(SpeakCommand::default()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::MissingField("text")));
    }

    #[tokio::test]
    async fn test_remote_fault_is_surfaced_once() {
        let fake = Arc::new(FakeSpeechSynthesizer::failing("Quota exceeded"));
        let handler = handler_with(&fake, true);

        let err = handler.handle(command("Hello")).await.unwrap_err();

        assert_eq!(err.to_string(), "Error generating speech: Quota exceeded");
        assert_eq!(fake.call_count(), 1);
    }
}
