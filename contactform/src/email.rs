use anyhow::Context;
use contactform_config::EmailConfig;
use contactform_email_impl::{EmailServiceImpl, SmtpConfig};

/// Connect to the SMTP server
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&smtp_config(config), config.from.clone())
        .await
        .context("Failed to connect to SMTP server")
}

fn smtp_config(config: &EmailConfig) -> SmtpConfig {
    SmtpConfig {
        host: config.smtp_host.clone(),
        port: config.smtp_port,
        secure: config.smtp_secure,
        username: config.smtp_username.clone(),
        password: config
            .smtp_password
            .as_ref()
            .map(|password| password.0.clone()),
    }
}
