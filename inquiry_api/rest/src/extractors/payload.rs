use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::Response,
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::routes::error;

pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

/// Request body that is either form-urlencoded or JSON, depending on the
/// `Content-Type` header. Anything that is not form-urlencoded is parsed as
/// JSON.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let result = if is_form {
            Form::<T>::from_request(request, state)
                .await
                .map(|Form(x)| x)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<T>::from_request(request, state)
                .await
                .map(|Json(x)| x)
                .map_err(|rejection| rejection.body_text())
        };

        result.map(Self).map_err(|rejection| {
            debug!(%rejection, "rejected request body");
            error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY)
        })
    }
}
