//! API key lookup from the process environment

use std::fmt;

use super::error::GeminiError;

/// Variable checked when the configured one is unset
pub const FALLBACK_ENV: &str = "API_KEY";

/// A Gemini API key read at startup
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank values
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    /// Read the key from `var`, falling back to `API_KEY`
    pub fn from_env(var: &str) -> Result<Self, GeminiError> {
        Self::resolve(var, |name| std::env::var(name).ok())
    }

    /// Key lookup against an arbitrary variable source
    fn resolve(
        var: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GeminiError> {
        lookup(var)
            .and_then(Self::new)
            .or_else(|| lookup(FALLBACK_ENV).and_then(Self::new))
            .ok_or_else(|| GeminiError::ApiKeyNotFound(var.to_string()))
    }

    /// The raw key, for the request header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Mask the key for display (show first and last 4 chars)
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}
