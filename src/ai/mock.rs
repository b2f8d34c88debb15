use super::GenerativeService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the Gemini endpoint.
///
/// Returns queued raw bodies in rotation and records every prompt it receives.
/// Clones share the same queues and call log.
#[derive(Clone)]
pub struct MockGenerativeClient {
    responses: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
}

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn with_raw_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Convenience for a well-formed body carrying a single text part.
    pub fn with_text_response(self, text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        });
        self.with_raw_response(body.to_string())
    }

    /// Make every call fail as if the vendor returned an error status.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeService for MockGenerativeClient {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let count = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        if let Some(message) = &self.failure {
            return Err(Error::AiProvider(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(r#"{"candidates":[{"content":{"parts":[{"text":"Mock response"}]}}]}"#.to_string())
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let client = MockGenerativeClient::new();

        assert_eq!(client.get_call_count(), 0);
        client.generate_content("first").await.unwrap();
        client.generate_content("second").await.unwrap();

        assert_eq!(client.get_call_count(), 2);
        assert_eq!(client.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let client = MockGenerativeClient::new()
            .with_raw_response("one")
            .with_raw_response("two");

        assert_eq!(client.generate_content("p").await.unwrap(), "one");
        assert_eq!(client.generate_content("p").await.unwrap(), "two");
        // Should cycle back
        assert_eq!(client.generate_content("p").await.unwrap(), "one");
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let client = MockGenerativeClient::new().with_failure("quota exceeded");
        let err = client.generate_content("p").await.unwrap_err();

        assert!(matches!(err, Error::AiProvider(_)));
        assert_eq!(client.get_call_count(), 1);
    }
}
