use std::fmt::Debug;

use reqwest::Client;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde_json::Value;

use crate::domain::SubscriptionRequest;
use crate::utils::error_chain_fmt;

/// Client for the third-party webhook that actually records subscriptions.
///
/// Establishing a HTTP connection is expensive, so a single `UpstreamClient`
/// is built at startup and shared by all workers; `reqwest::Client` pools
/// connections internally.
///
/// No timeout is set and nothing is retried: a forward runs until the
/// upstream answers or the connection fails.
#[derive(Clone)]
pub struct UpstreamClient {
    http_client: Client,
    url: Secret<String>,
}

/// What the upstream answered with. The body is whatever json it sent.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(thiserror::Error)]
pub enum UpstreamError {
    #[error("Failed to reach the subscription service")]
    Unreachable(#[source] reqwest::Error),
    #[error("The subscription service sent a response that was not valid JSON")]
    InvalidBody(#[source] reqwest::Error),
}

impl Debug for UpstreamError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl UpstreamClient {
    pub fn new(url: Secret<String>) -> Self {
        Self {
            http_client: Client::new(),
            url,
        }
    }

    /// POST `request` as json to the upstream and parse its reply as json.
    ///
    /// A non-2xx status is -not- an error here; the caller decides what to do
    /// with `UpstreamReply::status`. Redirects are followed, which the Apps
    /// Script webhook relies on.
    #[tracing::instrument(name = "Forwarding subscription upstream", skip_all, err(Debug))]
    pub async fn forward(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<UpstreamReply, UpstreamError> {
        let resp = self
            .http_client
            .post(self.url.expose_secret())
            // also sets `Content-Type: application/json`
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::Unreachable)?;

        let status = resp.status();
        let body = resp
            .json::<Value>()
            .await
            .map_err(UpstreamError::InvalidBody)?;

        Ok(UpstreamReply { status, body })
    }
}
