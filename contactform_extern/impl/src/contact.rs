use std::sync::Arc;

use contactform_extern_contracts::{ContactApiError, ContactApiService};
use contactform_models::contact::ContactSubmission;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    pub endpoint: Arc<Url>,
}

impl ContactApiServiceImpl {
    pub fn new(config: ContactApiServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl ContactApiService for ContactApiServiceImpl {
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactApiError> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&submission)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        let status = response.status();
        debug!(%status, "submission endpoint responded");
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<MessageResponse>()
            .await
            .ok()
            .map(|response| response.message);

        Err(ContactApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}
