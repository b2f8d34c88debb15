use super::types::GenerateContentRequest;
use crate::ai::GenerativeService;
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Gemini REST client that posts a prompt to a configured `generateContent` URL.
pub struct GeminiHttpClient {
    client: Client,
    api_url: Url,
    api_key: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    pub fn new(api_url: Url, api_key: String) -> Self {
        Self::new_with_client(api_url, api_key, Client::new())
    }

    pub fn new_with_client(api_url: Url, api_key: String, client: Client) -> Self {
        Self {
            client,
            api_url,
            api_key,
            timeout: None,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new_with_client(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            client,
        )
        .with_timeout(config.timeout)
    }

    /// Per-request timeout; `None` leaves it to the underlying client.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint URL with the API key appended as the `key` query parameter.
    pub fn request_url(&self) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl GenerativeService for GeminiHttpClient {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);

        tracing::debug!(
            "Sending generateContent request to {} ({} prompt bytes)",
            self.api_url,
            prompt.len()
        );

        let mut builder = self
            .client
            .post(self.request_url())
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        // The request URL carries the API key; keep it out of errors and logs.
        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to send request to Gemini: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(reqwest::Error::without_url)?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "Gemini API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        tracing::debug!("Response from Gemini API: {}", body);
        Ok(body)
    }
}
