use std::sync::Arc;

use inquiry_core_contact_contracts::{ContactSendMessageError, ContactService};
use inquiry_email_contracts::{Email, EmailBody, EmailService};
use inquiry_models::{contact::ContactInquiry, email_address::EmailAddressWithName};
use inquiry_templates_contracts::{
    ContactInquiryHtmlTemplate, ContactInquiryTextTemplate, TemplateService,
};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub recipients: Arc<Vec<EmailAddressWithName>>,
}

impl<Email, Template> ContactServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template, config: ContactServiceConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, Template> ContactService for ContactServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_message(&self, inquiry: ContactInquiry) -> Result<(), ContactSendMessageError> {
        let text = self.template.render(&ContactInquiryTextTemplate {
            name: (*inquiry.name).clone(),
            email: inquiry.email.to_string(),
            phone: (*inquiry.phone).clone(),
            message: (*inquiry.message).clone(),
        })?;
        let html = self.template.render(&ContactInquiryHtmlTemplate {
            name: (*inquiry.name).clone(),
            email: inquiry.email.to_string(),
            phone: (*inquiry.phone).clone(),
            message: (*inquiry.message).clone(),
        })?;

        let email = Email {
            recipients: (*self.config.recipients).clone(),
            subject: format!("New contact form message from {}", *inquiry.name),
            body: EmailBody::Alternative { text, html },
            reply_to: Some(inquiry.email.into()),
        };

        match self.email.send(email).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("smtp server rejected contact inquiry");
                return Err(ContactSendMessageError::Send);
            }
            Err(err) => {
                warn!("failed to send contact inquiry: {err:#}");
                return Err(ContactSendMessageError::Send);
            }
        }

        info!(recipients = self.config.recipients.len(), "contact inquiry delivered");

        Ok(())
    }
}
