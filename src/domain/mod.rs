//! Domain Layer - 领域层
//!
//! Voice Context: 音色参数与默认音色选择

pub mod voice;
