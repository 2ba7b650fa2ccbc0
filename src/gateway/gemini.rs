//! Gateway backed by the Gemini API

use crate::gemini::{Content, GeminiClient, GeminiError, GenerateContentRequest};
use crate::session::{ChatMessage, QuizQuestion, Role};

use super::quiz::parse_quiz;
use super::{Gateway, LESSON_EMPTY, LESSON_ERROR, REPLY_ERROR, prompts};

/// Generation gateway talking to Gemini
pub struct GeminiGateway {
    client: GeminiClient,
}

impl GeminiGateway {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

/// Request for a lesson
fn lesson_request(title: &str, description: &str) -> GenerateContentRequest {
    GenerateContentRequest::prompt(prompts::lesson_prompt(title, description))
}

/// Request for a quiz with the response schema attached
fn quiz_request(title: &str, count: usize) -> GenerateContentRequest {
    GenerateContentRequest::prompt(prompts::quiz_prompt(title, count))
        .with_json_schema(prompts::quiz_schema())
}

/// Chat request: prior thread, the new message, and the tutor persona
fn reply_request(history: &[ChatMessage], message: &str, topic_title: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|m| match m.role {
            Role::User => Content::user(&m.text),
            Role::Model => Content::model(&m.text),
        })
        .collect();
    contents.push(Content::user(message));

    GenerateContentRequest::new(contents).with_system(prompts::tutor_instruction(topic_title))
}

impl Gateway for GeminiGateway {
    async fn produce_lesson(&self, title: &str, description: &str) -> String {
        match self.client.generate_text(&lesson_request(title, description)).await {
            Ok(text) => text,
            Err(GeminiError::EmptyResponse) => {
                tracing::warn!(topic = title, "lesson response had no text");
                LESSON_EMPTY.to_string()
            }
            Err(e) => {
                tracing::error!(topic = title, "Error generating lesson: {}", e);
                LESSON_ERROR.to_string()
            }
        }
    }

    async fn produce_quiz(&self, title: &str, count: usize) -> Vec<QuizQuestion> {
        if count == 0 {
            return Vec::new();
        }

        let text = match self.client.generate_text(&quiz_request(title, count)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(topic = title, "Error generating quiz: {}", e);
                return Vec::new();
            }
        };

        parse_quiz(&text, count).unwrap_or_else(|e| {
            tracing::error!(topic = title, "Rejected quiz payload: {}", e);
            Vec::new()
        })
    }

    async fn produce_reply(&self, history: &[ChatMessage], message: &str, topic_title: &str) -> String {
        match self.client.generate_text(&reply_request(history, message, topic_title)).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(topic = topic_title, "Chat error: {}", e);
                REPLY_ERROR.to_string()
            }
        }
    }
}
