pub mod client;
pub mod proxy_client;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use client::GeminiClient;
pub use proxy_client::ProxyClient;

/// Status and JSON body of one `generateContent` exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Anything that can deliver a `generateContent` payload: the Gemini API
/// itself, or the FitRoom proxy in front of it.
#[async_trait]
pub trait GenerateTransport: Send + Sync {
    /// Sends the payload unmodified. Non-2xx statuses are returned, not raised.
    async fn send(&self, payload: &Value) -> Result<TransportResponse>;

    /// False when a required credential is missing.
    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

/// Only a 2xx body has to be JSON. Error bodies that do not parse become
/// `Value::Null`, so the caller still sees the status.
pub(crate) async fn read_json_response(response: reqwest::Response) -> Result<TransportResponse> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    parse_body(status, &bytes)
}

fn parse_body(status: u16, bytes: &[u8]) -> Result<TransportResponse> {
    let body = if (200..300).contains(&status) {
        serde_json::from_slice(bytes)?
    } else {
        serde_json::from_slice(bytes).unwrap_or_else(|_| {
            log::debug!(
                "non-JSON {} body: {}",
                status,
                String::from_utf8_lossy(bytes).chars().take(200).collect::<String>()
            );
            Value::Null
        })
    };
    Ok(TransportResponse::new(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_helpers() {
        assert!(TransportResponse::new(200, json!({})).is_success());
        assert!(TransportResponse::new(204, json!(null)).is_success());
        assert!(!TransportResponse::new(429, json!({})).is_success());
        assert!(TransportResponse::new(429, json!({})).is_rate_limited());
        assert!(!TransportResponse::new(500, json!({})).is_rate_limited());
    }

    #[test]
    fn test_error_bodies_need_not_be_json() {
        let response = parse_body(429, b"Too Many Requests").unwrap();
        assert!(response.is_rate_limited());
        assert_eq!(response.body, Value::Null);

        let response = parse_body(503, b"<html><body>Unavailable</body></html>").unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(response.body, Value::Null);

        let response = parse_body(400, br#"{"error":{"message":"bad"}}"#).unwrap();
        assert_eq!(response.body["error"]["message"], "bad");
    }

    #[test]
    fn test_success_body_must_be_json() {
        let err = parse_body(200, b"<html></html>").unwrap_err();
        assert!(matches!(err, crate::error::FitRoomError::Parse(_)));
    }
}
