use contactform_config::Config;
use contactform_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email).await?;
    if let Err(err) = email.ping().await {
        // Submissions fail until the relay is reachable, /health reports it.
        warn!("Smtp server is not reachable: {err:#}");
    }

    let provider = Provider::new(ConfigProvider::new(&config), email);
    let server = provider.rest_server()?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
