use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::SubscriberEmail;

/// Body of `POST /api/proxy/subscribe`.
///
/// The relay never inspects it beyond logging: whatever object the caller
/// sent is forwarded to the upstream unchanged (extra fields included, key
/// order preserved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SubscriptionRequest(Map<String, Value>);

impl SubscriptionRequest {
    /// The `{ "email": ... }` body the form sends.
    pub fn new(email: &SubscriberEmail) -> Self {
        let mut body = Map::new();
        body.insert("email".to_string(), Value::String(email.as_ref().to_string()));
        Self(body)
    }

    /// `None` if the caller didn't send a string `email` field.
    pub fn email(&self) -> Option<&str> { self.0.get("email").and_then(Value::as_str) }
}

impl From<Map<String, Value>> for SubscriptionRequest {
    fn from(body: Map<String, Value>) -> Self { Self(body) }
}
