use std::sync::Arc;

use contactform_core_contact_contracts::{ContactSendMessageError, ContactService};
use contactform_email_contracts::{ContentType, Email, EmailService};
use contactform_models::{
    contact::{ContactMethod, ContactSubmission},
    email_address::{EmailAddress, EmailAddressWithName},
};
use contactform_templates_contracts::{ContactSubmissionTemplate, TemplateService};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Template, Email> {
    template: Template,
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Fixed recipient of all notifications.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Template, Email> ContactServiceImpl<Template, Email> {
    pub fn new(template: Template, email: Email, config: ContactServiceConfig) -> Self {
        Self {
            template,
            email,
            config,
        }
    }
}

impl<TemplateS, EmailS> ContactService for ContactServiceImpl<TemplateS, EmailS>
where
    TemplateS: TemplateService,
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let errors = submission.validate();
        if !errors.is_empty() {
            return Err(ContactSendMessageError::Invalid(errors));
        }

        info!(contact_method = %submission.contact_method, "relaying contact form submission");

        let reply_to = reply_to(&submission);
        let ContactSubmission {
            name,
            contact_method,
            contact_info,
        } = submission;

        let body = self.template.render(&ContactSubmissionTemplate {
            name: name.clone(),
            contact_method: contact_method.id().into(),
            contact_info,
        })?;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("New Form submission from: {name}"),
            body,
            content_type: ContentType::Html,
            reply_to,
        };

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        Ok(())
    }
}

/// Submitters who prefer email can be answered directly.
fn reply_to(submission: &ContactSubmission) -> Option<EmailAddressWithName> {
    (submission.contact_method == ContactMethod::Email)
        .then(|| submission.contact_info.trim().parse::<EmailAddress>().ok())
        .flatten()
        .map(|email| email.with_name(submission.name.trim().into()))
}
