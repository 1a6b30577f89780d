use anyhow::Context;
use subscribe_relay::configuration::get_configuration;
use subscribe_relay::startup::Application;
use subscribe_relay::telemetry::get_subscriber;
use subscribe_relay::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the relay server
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("subscribe-relay", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration().context("Failed to read configuration")?;

    let server = Application::build(cfg).await?;
    server.run_until_stopped().await?;
    Ok(())
}
