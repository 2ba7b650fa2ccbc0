//! Generation gateway
//!
//! Lesson text, quiz questions and tutor replies all come from a language
//! model. Every failure is absorbed here and turned into a fixed fallback, so
//! callers never see an error.

mod gemini;
pub mod prompts;
pub mod quiz;

use std::future::Future;

use crate::session::{ChatMessage, QuizQuestion};

pub use gemini::GeminiGateway;

/// Shown when the lesson request fails
pub const LESSON_ERROR: &str = "حدث خطأ أثناء الاتصال بخدمة الذكاء الاصطناعي.";

/// Shown when the model answers with no text
pub const LESSON_EMPTY: &str = "عذراً، لم أتمكن من توليد المحتوى حالياً.";

/// Tutor reply when the chat request fails
pub const REPLY_ERROR: &str = "عذراً، واجهت مشكلة في معالجة سؤالك.";

/// Source of generated content.
///
/// Each call is a single best-effort request with no retry and no caching.
pub trait Gateway: Send + Sync + 'static {
    /// Lesson text for a topic; a fallback sentence on failure
    fn produce_lesson(&self, title: &str, description: &str) -> impl Future<Output = String> + Send;

    /// Exactly `count` questions, or none on any failure
    fn produce_quiz(&self, title: &str, count: usize)
    -> impl Future<Output = Vec<QuizQuestion>> + Send;

    /// Next tutor reply given the prior thread; an apology on failure
    fn produce_reply(
        &self,
        history: &[ChatMessage],
        message: &str,
        topic_title: &str,
    ) -> impl Future<Output = String> + Send;
}
