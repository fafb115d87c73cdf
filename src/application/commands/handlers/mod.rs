//! Command Handlers

mod speak_handler;

pub use speak_handler::SpeakHandler;
