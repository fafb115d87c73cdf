//! HTTP Layer - Speak API
//!
//! - `GET /`            服务横幅
//! - `GET /api/ping`    健康检查
//! - `POST /api/speak`  文本转语音

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{build_router, HttpServer};
pub use state::AppState;
