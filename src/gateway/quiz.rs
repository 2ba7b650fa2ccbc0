//! Validation of generated quiz payloads

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::session::QuizQuestion;

/// A JSON payload wrapped in a Markdown code fence
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").unwrap());

/// Why a quiz payload was rejected
#[derive(Debug, Error)]
pub enum QuizPayloadError {
    #[error("payload does not match the quiz schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("question {index} needs four options and an answer index in 0..4")]
    Malformed { index: usize },

    #[error("expected {expected} questions, got {actual}")]
    TooFew { expected: usize, actual: usize },
}

/// Parse and check a quiz payload.
///
/// Every question must be well formed and at least `count` must be present;
/// extras are dropped.
pub fn parse_quiz(text: &str, count: usize) -> Result<Vec<QuizQuestion>, QuizPayloadError> {
    let json = FENCE_RE.captures(text).and_then(|c| c.get(1)).map_or(text, |m| m.as_str());
    let mut questions: Vec<QuizQuestion> = serde_json::from_str(json)?;

    if let Some(index) = questions.iter().position(|q| !q.is_well_formed()) {
        return Err(QuizPayloadError::Malformed { index });
    }
    if questions.len() < count {
        return Err(QuizPayloadError::TooFew { expected: count, actual: questions.len() });
    }

    questions.truncate(count);
    Ok(questions)
}
