//! Generative AI integration
//!
//! Provides the seam between prompt construction and the vendor endpoint that
//! turns a prompt into a raw JSON response body.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiHttpClient;
pub use mock::MockGenerativeClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Submit a single-turn prompt and return the raw response body.
    async fn generate_content(&self, prompt: &str) -> Result<String>;
}
