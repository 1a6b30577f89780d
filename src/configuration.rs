use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::path::PathBuf;

use config::Config;
use config::ConfigError;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::relay_client::RelayClient;
use crate::upstream_client::UpstreamClient;

/// Global configuration, loaded from the `configuration` directory. See
/// `get_configuration`.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub upstream: UpstreamSettings,
    pub client: ClientSettings,
}

/// Server configuration
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    /// Directory holding the built front end; `index.html` in this directory
    /// doubles as the fallback for unknown paths.
    pub static_dir: PathBuf,
}

/// Where subscription requests are forwarded to
#[derive(Deserialize, Clone)]
pub struct UpstreamSettings {
    /// Anyone holding the webhook url can write to the spreadsheet behind it,
    /// so it is kept out of logs.
    pub url: Secret<String>,

    /// Mirror the upstream's status code instead of always answering 200.
    #[serde(default)]
    pub propagate_status: bool,
}

impl UpstreamSettings {
    pub fn client(&self) -> UpstreamClient { UpstreamClient::new(self.url.clone()) }
}

/// Settings for the submission form (the `subscribe` binary)
#[derive(Deserialize, Clone)]
pub struct ClientSettings {
    /// Base url of the relay. Left unset, every submission fails with a
    /// configuration error before touching the network.
    #[serde(default)]
    pub relay_base_url: Option<String>,
}

impl ClientSettings {
    pub fn client(&self) -> RelayClient { RelayClient::new(self.relay_base_url.clone()) }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!(
                "{e} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`.
///
/// `base.yaml` is read first, then the file named after `APP_ENVIRONMENT`
/// (`local` by default), then `APP_`-prefixed env vars, e.g.
/// `APP_APPLICATION__PORT=5001` -> `Settings.application.port`. A bare `PORT`
/// env var, as set by most hosting platforms, wins over all of these.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Message(format!("could not get current dir: {e}")))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    tracing::info!("loading config for {env} env");

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        .add_source(
            // env vars are -always- parsed as String, hence `serde-aux` for numbers
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("application.port", env::var("PORT").ok())?
        .build()?;

    settings.try_deserialize::<Settings>()
}
