//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 出站端口定义（SpeechSynthesizerPort）
//! - commands: 命令及处理器（SpeakHandler）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::SpeakHandler, SpeakCommand, SpeakOptions, SpeakResponse, DEFAULT_LANGUAGE_CODE,
};

pub use error::ApplicationError;

pub use ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse, VoiceParams,
};
