//! HTTP Routes
//!
//! API Endpoints:
//! - /              GET   服务横幅
//! - /api/ping      GET   健康检查
//! - /api/speak     POST  文本转语音

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/speak", post(handlers::speak))
}
