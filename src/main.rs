mod api;
mod config;
mod ddns;
mod error;

use anyhow::Result;
use api::DnsPodClient;
use config::Config;
use ddns::DdnsUpdater;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_file =
        std::env::var("DDNS_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = Config::load(&config_file)?;

    let client = DnsPodClient::new(
        config.api_endpoint.clone(),
        &config.login_id,
        &config.login_token,
        config.record_line.clone(),
    );

    let mut updater = DdnsUpdater::new(config, client);
    updater.run().await;
    Ok(())
}
