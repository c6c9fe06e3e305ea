use anyhow::bail;
use clap::Args;
use inquiry_config::{Config, RelayEncoding as ConfigRelayEncoding};
use inquiry_core_form_contracts::{ContactFormService, SubmitOutcome};
use inquiry_core_form_impl::ContactFormServiceImpl;
use inquiry_extern_impl::relay::{
    MailRelayApiServiceConfig, MailRelayApiServiceImpl, RelayEncoding,
};
use inquiry_models::form::FieldName;
use tracing::info;
use url::Url;

use crate::console::{ConsoleView, Prompt};

/// Values given on the command line. Anything missing or invalid is asked for
/// interactively.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(long)]
    name: Option<String>,
    /// Your email address
    #[arg(long)]
    email: Option<String>,
    /// Your phone number
    #[arg(long)]
    phone: Option<String>,
    /// The message to send
    #[arg(long)]
    message: Option<String>,
    /// Mail relay endpoint to use instead of the configured one
    #[arg(long)]
    endpoint: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let endpoint = self.endpoint.unwrap_or(config.relay.endpoint);
        info!("Submitting contact inquiry to {endpoint}");

        let relay = MailRelayApiServiceImpl::new(MailRelayApiServiceConfig {
            endpoint: endpoint.into(),
            encoding: match config.relay.encoding {
                ConfigRelayEncoding::Json => RelayEncoding::Json,
                ConfigRelayEncoding::Form => RelayEncoding::Form,
            },
            timeout: *config.relay.timeout,
        })?;
        let mut form = ContactFormServiceImpl::new(relay, ConsoleView::stderr());

        let given = [
            (FieldName::Name, self.name),
            (FieldName::Email, self.email),
            (FieldName::Phone, self.phone),
            (FieldName::Message, self.message),
        ];
        for (field, value) in given {
            if let Some(value) = value {
                form.on_field_input(field, value);
                form.on_field_blur(field);
            }
        }

        run(&mut form).await
    }
}

/// Ask for every invalid field until the form validates, then submit it once.
async fn run(form: &mut impl ContactFormService) -> anyhow::Result<()> {
    let mut prompt = None;
    loop {
        while let Some(field) = form.state().errors.first() {
            let value = prompt
                .get_or_insert_with(Prompt::stdin)
                .read(field)
                .await?;
            form.on_field_input(field, value);
            form.on_field_blur(field);
        }

        match form.on_submit().await {
            SubmitOutcome::Sent => return Ok(()),
            SubmitOutcome::Invalid { focus } => info!(%focus, "form became invalid"),
            SubmitOutcome::Failed { .. } => bail!("Failed to submit contact inquiry"),
        }
    }
}
