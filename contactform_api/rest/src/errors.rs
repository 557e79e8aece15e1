use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contactform_models::contact::ValidationErrors;
use serde::Serialize;

pub const FORM_SUBMITTED: &str = "Form submitted successfully";
pub const FAILED_TO_SUBMIT: &str = "Failed to submit form";
pub const INVALID_SUBMISSION: &str = "Invalid form submission";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const NOT_FOUND: &str = "Not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

/// A response whose body is `{"message": ...}`.
pub fn message(code: StatusCode, message: &'static str) -> Response {
    (
        code,
        Json(ApiMessage {
            message,
            errors: None,
        }),
    )
        .into_response()
}

pub fn validation_error(errors: ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiMessage {
            message: INVALID_SUBMISSION,
            errors: Some(errors),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}
