//! TTS Adapter - Google Cloud Text-to-Speech 客户端实现

mod credentials;
mod fake_speech_synthesizer;
mod google_tts_client;
mod metadata_server;
mod token_source;

pub use credentials::{
    well_known_file, AuthorizedUserKey, CredentialError, GoogleCredentials, ServiceAccountKey,
    DEFAULT_TOKEN_URI,
};
pub use fake_speech_synthesizer::{FakeSpeechSynthesizer, FakeSynthesizerConfig};
pub use google_tts_client::*;
pub use metadata_server::{MetadataServer, DEFAULT_METADATA_ENDPOINT};
pub use token_source::{TokenSource, CLOUD_PLATFORM_SCOPE};
