use anyhow::anyhow;
use contactform_email_contracts::{ContentType, Email, EmailService};
use contactform_models::email_address::EmailAddressWithName;
use contactform_utils::Apply;
use lettre::{
    message::{header, MessageBuilder},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Connection settings of the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// `true` connects with implicit TLS, `false` upgrades via STARTTLS when
    /// the server offers it.
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl EmailServiceImpl {
    pub async fn new(config: &SmtpConfig, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let tls_parameters = TlsParameters::new(config.host.clone())?;
        let tls = if config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let credentials = config.username.clone().map(|username| {
            Credentials::new(username, config.password.clone().unwrap_or_default())
        });

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .apply_map(credentials, |builder, credentials| {
                builder.credentials(credentials)
            })
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        debug!(recipient = %email.recipient, subject = %email.subject, "sending email");
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
