use std::future::Future;

use inquiry_models::form::{SubmissionPayload, SubmissionResult};

/// The external service that delivers a contact inquiry as an email.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MailRelayApiService: Send + Sync + 'static {
    /// Submit the payload once.
    ///
    /// Returns `Err` if the relay could not be reached or its response could
    /// not be understood. A relay that rejects the inquiry yields
    /// `Ok(SubmissionResult { ok: false, .. })`.
    fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> impl Future<Output = anyhow::Result<SubmissionResult>> + Send;
}

#[cfg(feature = "mock")]
impl MockMailRelayApiService {
    pub fn with_submit(mut self, payload: SubmissionPayload, result: SubmissionResult) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_transport_error(mut self, payload: SubmissionPayload) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection refused"
                ))))
            });
        self
    }
}
