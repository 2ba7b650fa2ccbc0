//! HTTP client for the Gemini API

use std::time::Duration;

use reqwest::Client;

use super::auth::ApiKey;
use super::error::GeminiError;
use super::models::{GeminiModel, GenerateContentRequest, GenerateContentResponse};

/// Gemini API client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: ApiKey,
    /// Model used for every request
    model: GeminiModel,
    /// API base, without trailing slash
    endpoint: String,
}

impl GeminiClient {
    /// Default API base URL
    pub const DEFAULT_ENDPOINT: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a new client
    pub fn new(api_key: ApiKey, model: GeminiModel, timeout: Duration) -> Result<Self, GeminiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, api_key, model, endpoint: Self::DEFAULT_ENDPOINT.to_string() })
    }

    /// Point the client at a different API base
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the `generateContent` call for the configured model
    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model.model_id())
    }

    /// Send a request and return the complete response
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose())
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(GeminiError::RateLimited { retry_after_seconds: retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "generateContent finished"
            );
        }
        Ok(parsed)
    }

    /// Send a request and return only the generated text
    pub async fn generate_text(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        self.generate(request)
            .await?
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GeminiError::EmptyResponse)
    }
}

/// Pull `error.message` out of an API error body, or return the body as-is
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
