use anyhow::Context;
use inquiry_config::EmailConfig;
use inquiry_email_impl::EmailServiceImpl;

/// Connect to the SMTP server
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .await
        .context("Failed to connect to SMTP server")
}
