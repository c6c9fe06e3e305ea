use inquiry_api_rest::RestServer;
use inquiry_config::Config;
use inquiry_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use inquiry_email_contracts::EmailService;
use inquiry_templates_impl::TemplateServiceImpl;
use tracing::info;

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    email.ping().await?;

    let recipients = config
        .contact
        .recipients
        .into_iter()
        .map(Into::into)
        .collect::<Vec<_>>();
    info!("Forwarding contact inquiries to {} recipient(s)", recipients.len());

    let contact = ContactServiceImpl::new(
        email,
        TemplateServiceImpl::default(),
        ContactServiceConfig {
            recipients: recipients.into(),
        },
    );
    let server = RestServer::new(contact);

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
