//! Google Generative Language (Gemini) API client

pub mod client;
pub mod types;

pub use client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use types::*;
