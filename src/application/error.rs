//! 应用层错误定义
//!
//! Display 文本即返回给调用方的纯文本响应体

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求体缺少必填字段
    #[error("Missing \"{0}\" in request body.")]
    MissingField(&'static str),

    /// 合成客户端未初始化（启动时凭证缺失或无效）
    #[error("TTS Client not initialized. Check server logs.")]
    ClientNotReady,

    /// 远端合成失败
    #[error("Error generating speech: {0}")]
    RemoteSynthesis(String),
}

impl ApplicationError {
    /// 是否为调用方输入错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }
}

impl From<crate::application::ports::SynthesisError> for ApplicationError {
    fn from(err: crate::application::ports::SynthesisError) -> Self {
        Self::RemoteSynthesis(err.to_string())
    }
}
