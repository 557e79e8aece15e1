use axum::{http::StatusCode, response::Response};

use crate::errors::{message, NOT_FOUND};

pub mod contact;
pub mod health;

pub async fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, NOT_FOUND)
}
