//! Data models for Gemini API requests and responses

use serde::{Deserialize, Serialize};

/// Available Gemini models
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 3 Flash preview - fast, default
    #[default]
    Flash3Preview,
    /// Gemini 2.5 Flash - stable fast model
    Flash25,
    /// Gemini 2.5 Flash-Lite - cheapest
    FlashLite25,
    /// Gemini 2.5 Pro - most capable
    Pro25,
}

impl GeminiModel {
    /// Get the API model identifier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Flash3Preview => "gemini-3-flash-preview",
            Self::Flash25 => "gemini-2.5-flash",
            Self::FlashLite25 => "gemini-2.5-flash-lite",
            Self::Pro25 => "gemini-2.5-pro",
        }
    }

    /// Parse model from a short name or a full model id
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flash" | "flash3" | "gemini-3-flash-preview" => Some(Self::Flash3Preview),
            "flash25" | "gemini-2.5-flash" => Some(Self::Flash25),
            "lite" | "flash-lite" | "gemini-2.5-flash-lite" => Some(Self::FlashLite25),
            "pro" | "pro25" | "gemini-2.5-pro" => Some(Self::Pro25),
            _ => None,
        }
    }
}

impl std::str::FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| format!("Unknown model: {}. Options: flash, flash25, lite, pro", s))
    }
}

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A text part of a content entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// One conversation turn, or the system instruction when `role` is absent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Some(Role::User), parts: vec![Part { text: text.into() }] }
    }

    /// A model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Some(Role::Model), parts: vec![Part { text: text.into() }] }
    }

    /// A role-less entry, as used for system instructions
    pub fn instruction(text: impl Into<String>) -> Self {
        Self { role: None, parts: vec![Part { text: text.into() }] }
    }

    /// Concatenated text of all parts
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Output constraints for a request
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns, oldest first
    pub contents: Vec<Content>,
    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Optional output configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Create a request from conversation turns
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents, system_instruction: None, generation_config: None }
    }

    /// Single-prompt request
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::new(vec![Content::user(text)])
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::instruction(system));
        self
    }

    /// Ask for JSON output conforming to `schema`
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }
}

/// Response from `generateContent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if any
    pub fn text(&self) -> Option<String> {
        let text = self.candidates.first()?.content.as_ref()?.text();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// A generated candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}
