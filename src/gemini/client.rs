use crate::{
    config::GeminiConfig,
    error::{FitRoomError, Result, MISSING_KEY_MESSAGE},
    gemini::{read_json_response, GenerateTransport, TransportResponse},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Direct client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &GeminiConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerateTransport for GeminiClient {
    async fn send(&self, payload: &Value) -> Result<TransportResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FitRoomError::Config(MISSING_KEY_MESSAGE.into()))?;

        log::debug!("POST {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request failed: {}", e);
                FitRoomError::Transport(e)
            })?;

        let response = read_json_response(response).await?;
        if !response.is_success() {
            log::warn!("Gemini answered {}", response.status);
        }
        Ok(response)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
