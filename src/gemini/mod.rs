//! Gemini API integration module
//!
//! Provides API key lookup, request/response models and an HTTP client for
//! the `generateContent` endpoint.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use auth::ApiKey;
pub use client::GeminiClient;
pub use error::GeminiError;
pub use models::{Content, GeminiModel, GenerateContentRequest, GenerateContentResponse, Role};
