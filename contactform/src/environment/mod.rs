use std::sync::Arc;

use contactform_config::Config;
use contactform_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use contactform_core_health_impl::HealthServiceImpl;
use contactform_email_contracts::EmailService;
use contactform_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use contactform_templates_impl::TemplateServiceImpl;
use url::Url;

use self::types::{ContactForm, RestServer};

pub mod types;

/// Service configs derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    contact_service_config: ContactServiceConfig,
    contact_api_service_config: ContactApiServiceConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // Core
        let contact_service_config = ContactServiceConfig {
            recipient: config.contact.recipient.clone().into(),
        };

        // Extern
        let contact_api_service_config = ContactApiServiceConfig {
            endpoint: config.client.endpoint.clone().into(),
        };

        Self {
            contact_service_config,
            contact_api_service_config,
        }
    }

    /// Submit to `endpoint` instead of the configured one.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.contact_api_service_config.endpoint = Arc::new(endpoint);
        self
    }

    /// Build a form that submits to the configured endpoint.
    pub fn contact_form(&self) -> anyhow::Result<ContactForm> {
        let api = ContactApiServiceImpl::new(self.contact_api_service_config.clone())?;
        Ok(ContactForm::new(api))
    }
}

/// Provides the services of the http server on top of a mail collaborator.
#[derive(Debug)]
pub struct Provider<Email> {
    config: ConfigProvider,
    email: Email,
}

impl<Email> Provider<Email>
where
    Email: EmailService + Clone,
{
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { config, email }
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer<Email>> {
        let template = TemplateServiceImpl::new()?;
        let contact = ContactServiceImpl::new(
            template,
            self.email.clone(),
            self.config.contact_service_config.clone(),
        );
        let health = HealthServiceImpl::new(self.email.clone());
        Ok(contactform_api_rest::RestServer::new(health, contact))
    }
}
