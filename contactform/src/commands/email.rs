use anyhow::ensure;
use clap::Subcommand;
use contactform_config::Config;
use contactform_email_contracts::{ContentType, Email, EmailService};
use contactform_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email to check the smtp configuration
    Test {
        /// Defaults to the configured contact recipient
        recipient: Option<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => {
                let recipient = recipient.unwrap_or_else(|| config.contact.recipient.clone());
                test(&config, recipient).await
            }
        }
    }
}

async fn test(config: &Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email).await?;

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Contact Form Deliverability Test".into(),
            body: "Contact form submissions can be delivered to this address.".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "The smtp server did not accept the test email");

    Ok(())
}
