//! Speak Handler

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::SpeakCommand;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 请求体
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequest {
    pub text: Option<String>,
    pub language_code: Option<String>,
    pub gender: Option<String>,
    pub voice_name: Option<String>,
}

impl From<SpeakRequest> for SpeakCommand {
    fn from(req: SpeakRequest) -> Self {
        Self {
            text: req.text,
            language_code: req.language_code,
            gender: req.gender,
            voice_name: req.voice_name,
        }
    }
}

/// 合成语音，返回 audio/mpeg
///
/// 未带 JSON Content-Type 的请求按空对象处理
pub async fn speak(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => SpeakRequest::default(),
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };

    let result = state.speak_handler.handle(req.into()).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
