use std::fmt::Debug;

use reqwest::Client;
use reqwest::StatusCode;
use reqwest::Url;
use serde_json::Map;
use serde_json::Value;

use crate::domain::SubscriberEmail;
use crate::domain::SubscriptionRequest;
use crate::utils::error_chain_fmt;

/// Path of the relay route, appended to the configured base url.
pub const SUBSCRIBE_PATH: &str = "/api/proxy/subscribe";

/// The form's view of the relay.
///
/// The base url is kept as configured (possibly missing); it is only checked
/// when a submission is attempted, so a misconfigured client still starts
/// and reports the problem to whoever tries to subscribe.
#[derive(Clone)]
pub struct RelayClient {
    http_client: Client,
    base_url: Option<String>,
}

/// Every way a submission can fail. `Display` is the message shown to the
/// user; the cause chain is only logged.
#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    InvalidEmail(String),
    #[error("Subscriptions are not available right now: the relay address is not configured.")]
    Configuration,
    #[error("Something went wrong. Server responded with {}", .status.as_u16())]
    Rejected { status: StatusCode, body: Value },
    #[error("Error sending request. Please try again later.")]
    Network(#[source] reqwest::Error),
}

impl Debug for SubmitError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl RelayClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    /// Full url of the subscribe route, or `Configuration` if the base url is
    /// missing, blank or unparsable.
    fn subscribe_url(&self) -> Result<Url, SubmitError> {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or(SubmitError::Configuration)?;
        Url::parse(&format!("{}{SUBSCRIBE_PATH}", base.trim_end_matches('/')))
            .map_err(|_| SubmitError::Configuration)
    }

    /// Send one `{ "email": ... }` POST to the relay. Not retried.
    #[tracing::instrument(
        name = "Submitting subscription to relay",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn subscribe(
        &self,
        email: &SubscriberEmail,
    ) -> Result<(), SubmitError> {
        let url = self.subscribe_url()?;

        let resp = self
            .http_client
            .post(url)
            .json(&SubscriptionRequest::new(email))
            .send()
            .await
            .map_err(SubmitError::Network)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        // an error body is nice to have, not required
        let body = resp
            .json::<Value>()
            .await
            .unwrap_or_else(|_| Value::Object(Map::new()));
        tracing::error!(status = status.as_u16(), %body, "relay rejected subscription");
        Err(SubmitError::Rejected { status, body })
    }
}
