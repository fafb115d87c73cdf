//! HTTP Middleware
//!
//! 对 4xx / 5xx 响应记一条访问日志，响应本身原样返回

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Level;

/// 响应状态对应的日志级别，成功响应不记录
fn failure_level(status: StatusCode) -> Option<Level> {
    if status.is_server_error() {
        Some(Level::ERROR)
    } else if status.is_client_error() {
        Some(Level::WARN)
    } else {
        None
    }
}

/// 失败响应日志中间件
///
/// 只记录方法、路径（不含 query）、状态码与耗时；
/// 失败原因由 ApiError::into_response() 记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match failure_level(status) {
        Some(level) if level == Level::ERROR => tracing::error!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            "speak request failed"
        ),
        Some(_) => tracing::warn!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            "speak request rejected"
        ),
        None => {}
    }

    response
}
