//! Application State

use std::sync::Arc;

use crate::application::{SpeakHandler, SpeechSynthesizerPort};

/// 应用状态
///
/// 启动后只读，所有请求共享
pub struct AppState {
    pub speak_handler: SpeakHandler,
}

impl AppState {
    pub fn new(synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>, wavenet_enabled: bool) -> Self {
        Self {
            speak_handler: SpeakHandler::new(synthesizer, wavenet_enabled),
        }
    }
}
