use anyhow::Context;
use subscribe_relay::configuration::get_configuration;
use subscribe_relay::subscribe_form::SubscribeForm;
use subscribe_relay::telemetry::get_subscriber;
use subscribe_relay::telemetry::init_subscriber;

/// Submit one email address through the relay, the way the landing page's
/// form does.
///
/// ```sh
///     cargo run --bin subscribe -- john@foo.com
///     APP_ENVIRONMENT=production cargo run --bin subscribe -- john@foo.com
/// ```
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // stdout is for the user; logs go to stderr, and only when something's wrong
    let subscriber = get_subscriber("subscribe", "warn", std::io::stderr);
    init_subscriber(subscriber)?;

    let email = std::env::args()
        .nth(1)
        .context("usage: subscribe <email>")?;
    let cfg = get_configuration().context("Failed to read configuration")?;
    let relay = cfg.client.client();

    let mut form = SubscribeForm::new();
    form.edit(email);
    form.submit(&relay).await;
    let ack = form.outcome().map_err(|e| anyhow::anyhow!(e))?;
    println!("{ack}");
    Ok(())
}
