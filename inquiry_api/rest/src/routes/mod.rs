use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inquiry_models::form::SubmissionResult;

pub mod contact;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

/// Respond with `{"ok": false, "error": ...}`, the failure shape clients of
/// the relay expect.
pub fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(SubmissionResult::failure(error))).into_response()
}
