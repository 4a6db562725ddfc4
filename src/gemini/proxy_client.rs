use crate::{
    error::{FitRoomError, Result},
    gemini::{read_json_response, GenerateTransport, TransportResponse},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const GENERATE_PATH: &str = "/api/generate";

/// Sends payloads through a FitRoom proxy, which holds the credential.
#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }
}

#[async_trait]
impl GenerateTransport for ProxyClient {
    async fn send(&self, payload: &Value) -> Result<TransportResponse> {
        log::debug!("POST {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Proxy request failed: {}", e);
                FitRoomError::Transport(e)
            })?;

        read_json_response(response).await
    }

    fn name(&self) -> &str {
        "proxy"
    }
}
