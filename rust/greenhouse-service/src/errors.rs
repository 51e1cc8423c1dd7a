use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorPayload<'a>,
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => {
                let body = ErrorBody { error: ErrorPayload { code: "bad_request", message: msg } };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::NotFound(what) => {
                let body = ErrorBody {
                    error: ErrorPayload { code: "not_found", message: format!("{what} not found") },
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            AppError::Internal(e) => {
                let body = ErrorBody { error: ErrorPayload { code: "internal", message: e.to_string() } };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
