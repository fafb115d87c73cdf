//! Banner / Ping Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

pub const BANNER: &str = "Google TTS Backend is running! Use POST /api/speak to generate audio.";

/// 根路径横幅
pub async fn index() -> &'static str {
    BANNER
}

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 合成客户端是否已初始化
    pub tts_ready: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tts_ready: state.speak_handler.is_ready(),
    })
}
