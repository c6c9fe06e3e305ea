use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn, Span};

use super::request_id::RequestId;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_request(|_: &Request, _: &Span| debug!("request received"))
            .on_response(log_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn request_span(request: &Request) -> Span {
    let request_id = request.extensions().get::<RequestId>().copied();
    tracing::debug_span!(
        "http-request",
        method = %request.method(),
        path = request.uri().path(),
        request_id = request_id.map(tracing::field::display),
    )
}

fn log_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis();
    if status.is_server_error() {
        warn!(%status, latency_ms, "request failed");
    } else {
        debug!(%status, latency_ms, "request completed");
    }
}
