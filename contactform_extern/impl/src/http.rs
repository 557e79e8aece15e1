use std::{ops::Deref, sync::LazyLock};

use anyhow::Context;
use contactform_utils::contactform_version;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "contactform/{} (+{})",
        contactform_version(),
        env!("CARGO_PKG_HOMEPAGE")
    )
});

/// reqwest client shared by all services talking to the outside.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        let headers = HeaderMap::from_iter([(ACCEPT, HeaderValue::from_static("application/json"))]);

        reqwest::Client::builder()
            .user_agent(USER_AGENT.as_str())
            .default_headers(headers)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent() {
        assert!(USER_AGENT.starts_with("contactform/"));
        assert!(USER_AGENT.ends_with("(+https://example.com/contact)"));
    }
}
