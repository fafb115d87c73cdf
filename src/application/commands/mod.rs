//! Commands - 命令及处理器

pub mod handlers;
mod speak_commands;

pub use speak_commands::{SpeakCommand, SpeakOptions, SpeakResponse, DEFAULT_LANGUAGE_CODE};
