use std::{
    net::{IpAddr, Ipv4Addr},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Form, Json, Router,
};
use inquiry_models::form::{SubmissionPayload, SubmissionResult};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use url::Url;

/// Route of the service style relay, JSON in and out.
pub const JSON_ROUTE: &str = "/api/contact";
/// Route of the script style relay, form-encoded in and plain text out.
pub const FORM_ROUTE: &str = "/contact.php";

#[derive(Debug, Clone)]
pub struct StubReply {
    status: u16,
    body: StubBody,
    delay: Duration,
}

#[derive(Debug, Clone)]
enum StubBody {
    Ok,
    Failure(String),
    Raw(String),
}

impl StubReply {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: StubBody::Ok,
            delay: Duration::ZERO,
        }
    }

    /// Reject the inquiry with the given status and error message.
    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: StubBody::Failure(error.into()),
            delay: Duration::ZERO,
        }
    }

    /// Respond with `body` verbatim, regardless of the route.
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: StubBody::Raw(body.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[derive(Debug)]
struct RelayState {
    reply: StubReply,
    received: Mutex<Vec<SubmissionPayload>>,
}

/// A stub relay running in the background on an ephemeral port.
#[derive(Debug)]
pub struct RunningRelay {
    base_url: Url,
    state: Arc<RelayState>,
}

impl RunningRelay {
    pub fn json_endpoint(&self) -> Url {
        self.endpoint(JSON_ROUTE)
    }

    pub fn form_endpoint(&self) -> Url {
        self.endpoint(FORM_ROUTE)
    }

    /// Every payload received so far, in order of arrival.
    pub async fn received(&self) -> Vec<SubmissionPayload> {
        self.state.received.lock().await.clone()
    }

    fn endpoint(&self, route: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(route);
        url
    }
}

pub async fn spawn(reply: StubReply) -> anyhow::Result<RunningRelay> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind stub relay")?;
    let addr = listener.local_addr()?;
    let state = Arc::new(RelayState {
        reply,
        received: Default::default(),
    });

    let router = router(Arc::clone(&state));
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok(RunningRelay {
        base_url: format!("http://{addr}").parse()?,
        state,
    })
}

pub async fn start_server(host: IpAddr, port: u16, reply: StubReply) -> anyhow::Result<()> {
    info!("Starting stub mail relay on {host}:{port}");
    info!("JSON endpoint: http://{host}:{port}{JSON_ROUTE}");
    info!("Form endpoint: http://{host}:{port}{FORM_ROUTE}");
    info!("Reply: {reply:?}");

    let state = Arc::new(RelayState {
        reply,
        received: Default::default(),
    });

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(state))
        .await
        .context("Failed to start HTTP server")
}

fn router(state: Arc<RelayState>) -> Router<()> {
    Router::new()
        .route(JSON_ROUTE, routing::post(submit_json))
        .route(FORM_ROUTE, routing::post(submit_form))
        .with_state(state)
}

async fn submit_json(
    state: State<Arc<RelayState>>,
    Json(payload): Json<SubmissionPayload>,
) -> Response {
    let reply = record(&state, payload).await;
    let status = reply.status();
    let body = match reply.body {
        StubBody::Ok => Json(SubmissionResult::ok()).into_response(),
        StubBody::Failure(error) => Json(SubmissionResult::failure(error)).into_response(),
        StubBody::Raw(body) => body.into_response(),
    };
    (status, body).into_response()
}

async fn submit_form(
    state: State<Arc<RelayState>>,
    Form(payload): Form<SubmissionPayload>,
) -> Response {
    let reply = record(&state, payload).await;
    let status = reply.status();
    let body = match reply.body {
        StubBody::Ok => "Thank you for your message!".to_owned(),
        StubBody::Failure(body) | StubBody::Raw(body) => body,
    };
    (status, body).into_response()
}

async fn record(state: &RelayState, payload: SubmissionPayload) -> StubReply {
    info!(?payload, "received inquiry");
    state.received.lock().await.push(payload);
    tokio::time::sleep(state.reply.delay).await;
    state.reply.clone()
}
