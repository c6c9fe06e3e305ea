use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use inquiry_core_contact_contracts::{ContactSendMessageError, ContactService};
use inquiry_models::{contact::ContactInquiry, form::SubmissionResult};

use super::{error, internal_server_error};
use crate::{
    extractors::payload::Payload,
    models::contact::{ApiContactInquiry, ApiContactInquiryError},
};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    Payload(inquiry): Payload<ApiContactInquiry>,
) -> Response {
    let inquiry = match ContactInquiry::try_from(inquiry) {
        Ok(inquiry) => inquiry,
        Err(ApiContactInquiryError::Missing) => {
            return error(StatusCode::BAD_REQUEST, "Missing required fields")
        }
        Err(ApiContactInquiryError::Invalid) => {
            return error(StatusCode::BAD_REQUEST, "Invalid field value")
        }
    };

    match service.send_message(inquiry).await {
        Ok(()) => Json(SubmissionResult::ok()).into_response(),
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
