use std::future::Future;

use inquiry_models::contact::ContactInquiry;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Deliver the inquiry to the configured recipients.
    fn send_message(
        &self,
        inquiry: ContactInquiry,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        inquiry: ContactInquiry,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(inquiry))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
