use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use serde::Serialize;

use crate::domain::SubscriptionRequest;
use crate::upstream_client::UpstreamClient;
use crate::upstream_client::UpstreamError;
use crate::utils::error_chain_fmt;

/// Whether the relay mirrors the upstream's status code (wrapped, because
/// `Data` is looked up by type and a bare `bool` says nothing).
#[derive(Clone, Copy)]
pub struct PropagateStatus(pub bool);

#[derive(Serialize)]
struct ErrorEnvelope {
    error: &'static str,
    details: String,
}

#[derive(thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl Debug for RelayError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode { StatusCode::INTERNAL_SERVER_ERROR }

    /// Only the top-level message reaches the caller; the cause chain stays in
    /// the logs.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: "Internal Server Error",
            details: self.to_string(),
        })
    }
}

/// `POST /api/proxy/subscribe`
///
/// Forwards the json body, untouched, to the upstream webhook and answers with
/// whatever json the upstream replied. The body is not validated; anything
/// that isn't a json object is rejected by the extractor with 400.
///
/// # Request example
///
/// ```sh
///     curl -v -H 'Content-Type: application/json' --data '{"email":"john@foo.com"}' http://127.0.0.1:3000/api/proxy/subscribe
/// ```
///
/// Unless `PropagateStatus` is set, a reply is 200 even if the upstream said
/// otherwise, as long as it said it in json.
#[tracing::instrument(
    name = "Relaying subscription",
    skip(body, upstream, propagate),
    fields(subscriber_email = %body.email().unwrap_or_default())
)]
pub async fn proxy_subscribe(
    body: web::Json<SubscriptionRequest>,
    upstream: web::Data<UpstreamClient>,
    propagate: web::Data<PropagateStatus>,
) -> Result<HttpResponse, RelayError> {
    let request = body.into_inner();
    tracing::info!(?request, "Received subscription request");

    let reply = upstream.forward(&request).await?;
    tracing::info!(
        upstream_status = reply.status.as_u16(),
        body = %reply.body,
        "Response from upstream"
    );

    let status = match propagate.0 {
        // reqwest and actix don't share a `StatusCode` type
        true => StatusCode::from_u16(reply.status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
        false => {
            if !reply.status.is_success() {
                tracing::warn!(
                    upstream_status = reply.status.as_u16(),
                    "upstream reported a failure; answering 200 anyway"
                );
            }
            StatusCode::OK
        }
    };

    Ok(HttpResponse::build(status).json(reply.body))
}
