use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Json, Router,
};
use contactform_core_contact_contracts::{ContactSendMessageError, ContactService};
use tracing::{debug, error};

use crate::{
    errors::{
        message, validation_error, FAILED_TO_SUBMIT, FORM_SUBMITTED, INVALID_SUBMISSION,
        METHOD_NOT_ALLOWED,
    },
    models::contact::ApiContactSubmission,
};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactService>>,
    payload: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            debug!("rejected contact form payload: {rejection}");
            return message(StatusCode::BAD_REQUEST, INVALID_SUBMISSION);
        }
    };

    match service.send_message(submission.into()).await {
        Ok(()) => message(StatusCode::OK, FORM_SUBMITTED),
        Err(ContactSendMessageError::Invalid(errors)) => validation_error(errors),
        Err(ContactSendMessageError::Send) => {
            error!("Error sending email: smtp server did not accept the message");
            message(StatusCode::INTERNAL_SERVER_ERROR, FAILED_TO_SUBMIT)
        }
        Err(ContactSendMessageError::Other(err)) => {
            error!("Error sending email: {err:#}");
            message(StatusCode::INTERNAL_SERVER_ERROR, FAILED_TO_SUBMIT)
        }
    }
}

async fn method_not_allowed() -> Response {
    message(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
