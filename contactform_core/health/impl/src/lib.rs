use contactform_core_health_contracts::{HealthService, HealthStatus};
use contactform_email_contracts::EmailService;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl<Email> {
    email: Email,
}

impl<Email> HealthServiceImpl<Email> {
    pub fn new(email: Email) -> Self {
        Self { email }
    }
}

impl<Email> HealthService for HealthServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
            .is_ok();

        HealthStatus { email }
    }
}

#[cfg(test)]
mod tests {
    use contactform_email_contracts::MockEmailService;

    use super::*;

    #[tokio::test]
    async fn healthy() {
        let sut = HealthServiceImpl::new(MockEmailService::new().with_ping(true));
        assert_eq!(sut.get_status().await, HealthStatus { email: true });
    }

    #[tokio::test]
    async fn smtp_unreachable() {
        let sut = HealthServiceImpl::new(MockEmailService::new().with_ping(false));
        assert_eq!(sut.get_status().await, HealthStatus { email: false });
    }
}
