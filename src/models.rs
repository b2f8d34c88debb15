//! Data models and structures
//!
//! Defines the research request accepted from callers, the closed set of
//! operations, and the runtime configuration for the Gemini endpoint.

use crate::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Summarize,
    Suggest,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Summarize => "summarize",
            Operation::Suggest => "suggest",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "summarize" => Ok(Operation::Summarize),
            "suggest" => Ok(Operation::Suggest),
            other => Err(Error::InvalidArgument(format!(
                "Unknown operation: {}",
                other
            ))),
        }
    }
}

/// Caller-supplied request body, e.g. `{"operation": "summarize", "content": "..."}`.
///
/// Both fields are optional on the wire so that a missing field is reported
/// as an invalid argument rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchRequest {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ResearchRequest {
    pub fn new(operation: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            content: Some(content.into()),
        }
    }

    /// Decode a JSON request body; a literal `null` body yields `None`.
    pub fn from_json(body: &str) -> Result<Option<Self>> {
        serde_json::from_str(body)
            .map_err(|e| Error::InvalidArgument(format!("Malformed request body: {}", e)))
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_url: Url,
    pub gemini_api_key: String,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("GEMINI_API_URL")
            .ok_or_else(|| Error::Config("GEMINI_API_URL not set".to_string()))?;
        let gemini_api_url = Url::parse(raw_url.trim()).map_err(|e| {
            Error::Config(format!("GEMINI_API_URL is not a valid URL: {}", e))
        })?;
        if !matches!(gemini_api_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "GEMINI_API_URL must use http or https, got '{}'",
                gemini_api_url.scheme()
            )));
        }

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "GEMINI_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "GEMINI_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            gemini_api_url,
            gemini_api_key,
            timeout,
        })
    }
}
