//! Request/response adapter around the generative endpoint.

use crate::ai::gemini::GeminiResponse;
use crate::ai::{GeminiHttpClient, GenerativeService};
use crate::models::{Config, ResearchRequest};
use crate::{prompts, Result};
use tracing::{debug, warn};

pub const NO_CONTENT: &str = "NO CONTENT FOUND IN RESPONSE";
pub const PARSE_ERROR_PREFIX: &str = "ERROR PARSING RESPONSE: ";

pub struct ResearchService {
    client: Box<dyn GenerativeService>,
}

impl ResearchService {
    pub fn new(client: Box<dyn GenerativeService>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Self {
        Self::new(Box::new(GeminiHttpClient::from_config(config, http_client)))
    }

    /// Build a prompt for the request, submit it, and extract the answer.
    ///
    /// Only invalid input and transport/status failures are errors; an
    /// unusable response body comes back as a sentinel string.
    pub async fn process_content(&self, request: &ResearchRequest) -> Result<String> {
        self.process(Some(request)).await
    }

    /// Same as [`process_content`](Self::process_content) for a raw JSON body
    /// such as `{"operation":"summarize","content":"..."}`.
    pub async fn process_json(&self, body: &str) -> Result<String> {
        let request = ResearchRequest::from_json(body)?;
        self.process(request.as_ref()).await
    }

    /// Process a possibly absent request; `None` is rejected as invalid input.
    pub async fn process(&self, request: Option<&ResearchRequest>) -> Result<String> {
        let prompt = prompts::build_prompt(request)?;
        debug!(
            "Built {} prompt ({} bytes)",
            request
                .and_then(|r| r.operation.as_deref())
                .unwrap_or_default(),
            prompt.len()
        );

        let response = self.client.generate_content(&prompt).await?;
        Ok(Self::extract_text(&response))
    }

    /// Pull the first candidate's first text part out of a raw response body.
    pub fn extract_text(response: &str) -> String {
        match serde_json::from_str::<GeminiResponse>(response) {
            Ok(parsed) => match parsed.first_text() {
                Some(text) => text.to_string(),
                None => {
                    warn!("Gemini response contained no text content");
                    NO_CONTENT.to_string()
                }
            },
            Err(e) => {
                warn!("Failed to parse Gemini response: {}", e);
                format!("{}{}", PARSE_ERROR_PREFIX, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockGenerativeClient;
    use crate::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_text_returns_first_part() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"- point one\n- point two"}]}}]}"#;
        assert_eq!(
            ResearchService::extract_text(raw),
            "- point one\n- point two"
        );
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        assert_eq!(
            ResearchService::extract_text(r#"{"candidates":[]}"#),
            NO_CONTENT
        );
    }

    #[test]
    fn test_extract_text_missing_nested_fields() {
        for raw in [
            "{}",
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
        ] {
            assert_eq!(ResearchService::extract_text(raw), NO_CONTENT, "raw: {}", raw);
        }
    }

    #[test]
    fn test_extract_text_unparseable_body() {
        let result = ResearchService::extract_text("not json");
        assert!(result.starts_with(PARSE_ERROR_PREFIX));
        assert!(result.len() > PARSE_ERROR_PREFIX.len());
    }

    #[test]
    fn test_extract_text_shape_mismatch() {
        let result = ResearchService::extract_text(r#"{"candidates":"oops"}"#);
        assert!(result.starts_with(PARSE_ERROR_PREFIX));

        let result = ResearchService::extract_text(r#""just a string""#);
        assert!(result.starts_with(PARSE_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_process_content_submits_built_prompt() {
        let client = MockGenerativeClient::new().with_text_response("Related: ownership");
        let service = ResearchService::new(Box::new(client.clone()));

        let answer = service
            .process_content(&ResearchRequest::new("suggest", "lifetimes"))
            .await
            .unwrap();

        assert_eq!(answer, "Related: ownership");
        let sent = client.prompts();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Based on the following content"));
        assert!(sent[0].ends_with("lifetimes"));
    }

    #[tokio::test]
    async fn test_process_content_rejects_invalid_input_before_submitting() {
        let client = MockGenerativeClient::new();
        let service = ResearchService::new(Box::new(client.clone()));

        let err = service
            .process_content(&ResearchRequest::new("explain", "x"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(client.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_process_content_returns_sentinel_for_bad_body() {
        let service =
            ResearchService::new(Box::new(MockGenerativeClient::new().with_raw_response("<html>")));

        let answer = service
            .process_content(&ResearchRequest::new("summarize", "text"))
            .await
            .unwrap();

        assert!(answer.starts_with(PARSE_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_process_content_propagates_provider_failure() {
        let service =
            ResearchService::new(Box::new(MockGenerativeClient::new().with_failure("boom")));

        let err = service
            .process_content(&ResearchRequest::new("summarize", "text"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_process_json() {
        let service =
            ResearchService::new(Box::new(MockGenerativeClient::new().with_text_response("ok")));

        let answer = service
            .process_json(r#"{"operation":"summarize","content":"some text"}"#)
            .await
            .unwrap();
        assert_eq!(answer, "ok");

        let err = service.process_json("null").await.unwrap_err();
        assert!(err.to_string().contains("Request object is null"));

        let err = service.process_json(r#"{"content":"x"}"#).await.unwrap_err();
        assert!(err.to_string().contains("missing"));

        let err = service.process_json("{").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
