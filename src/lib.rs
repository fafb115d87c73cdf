//! speak-relay - Google Cloud Text-to-Speech 转发服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色参数与默认音色表
//!
//! 应用层 (application/):
//! - Ports: SpeechSynthesizerPort
//! - Commands: SpeakCommand + SpeakHandler
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Google TTS Client（凭证、OAuth2 token）、Fake Synthesizer
//! - Bootstrap: 启动时构建合成客户端
//! - HTTP: `GET /`、`POST /api/speak`

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
