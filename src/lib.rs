//! Research assistant backend - turns selected text into Gemini prompts
//!
//! Builds a summarize/suggest prompt from a request, forwards it to the
//! Gemini `generateContent` endpoint, and extracts the first text completion.

pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod service;

pub use error::{Error, Result};
