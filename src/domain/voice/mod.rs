//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 性别 / 编码等音色值对象
//! - 未指定音色名时的默认音色选择

mod selection;
mod value_objects;

pub use selection::{resolve_voice, INDIAN_ENGLISH};
pub use value_objects::{AudioEncoding, VoiceGender};
