use std::{sync::Arc, time::Duration};

use anyhow::Context;
use inquiry_extern_contracts::relay::MailRelayApiService;
use inquiry_models::form::{SubmissionPayload, SubmissionResult};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct MailRelayApiServiceImpl {
    config: MailRelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct MailRelayApiServiceConfig {
    pub endpoint: Arc<Url>,
    pub encoding: RelayEncoding,
    pub timeout: Duration,
}

/// How the payload is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEncoding {
    /// `application/json` request, `{ok, error}` JSON response.
    Json,
    /// `application/x-www-form-urlencoded` request, success is signalled by
    /// the status code alone.
    Form,
}

impl MailRelayApiServiceImpl {
    pub fn new(config: MailRelayApiServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::with_timeout(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl MailRelayApiService for MailRelayApiServiceImpl {
    async fn submit(&self, payload: SubmissionPayload) -> anyhow::Result<SubmissionResult> {
        let request = self.client.post((*self.config.endpoint).clone());
        let request = match self.config.encoding {
            RelayEncoding::Json => request.json(&payload),
            RelayEncoding::Form => request.form(&payload),
        };

        let response = request
            .send()
            .await
            .context("Failed to reach mail relay")?;
        let status = response.status();
        debug!(%status, encoding = ?self.config.encoding, "mail relay responded");

        match self.config.encoding {
            RelayEncoding::Json => {
                let result = response
                    .json::<SubmissionResult>()
                    .await
                    .context("Failed to parse mail relay response")?;
                Ok(SubmissionResult {
                    ok: status.is_success() && result.ok,
                    error: result.error,
                })
            }
            RelayEncoding::Form => {
                if status.is_success() {
                    return Ok(SubmissionResult::ok());
                }
                let body = response
                    .text()
                    .await
                    .context("Failed to read mail relay response")?;
                let error = match serde_json::from_str::<SubmissionResult>(&body) {
                    Ok(result) => result.error,
                    Err(_) => Some(body.trim().to_owned()).filter(|x| !x.is_empty()),
                };
                Ok(SubmissionResult { ok: false, error })
            }
        }
    }
}
