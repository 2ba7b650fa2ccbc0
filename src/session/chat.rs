//! Tutor chat history for the selected topic

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::curriculum::Topic;

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single message in the chat thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique within the session
    pub id: String,
    /// Author
    pub role: Role,
    /// Message text
    pub text: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

/// What the gateway needs to produce the next reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// Messages before the new one, oldest first
    pub history: Vec<ChatMessage>,
    /// The message just sent
    pub message: String,
}

/// Append-only chat thread seeded with a greeting
#[derive(Debug, Clone)]
pub struct ChatSession {
    topic_id: String,
    messages: Vec<ChatMessage>,
    sending: bool,
    next_seq: u64,
}

impl ChatSession {
    /// Start a thread for `topic` with the tutor's greeting
    pub fn new(topic: &Topic) -> Self {
        let mut session =
            Self { topic_id: topic.id.clone(), messages: Vec::new(), sending: false, next_seq: 0 };
        session.push(Role::Model, greeting(&topic.title));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a reply is outstanding
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Append the user's message and hand back the gateway input.
    ///
    /// Returns `None` for blank text or while a reply is outstanding.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let text = text.trim();
        if text.is_empty() || self.sending {
            return None;
        }

        let history = self.messages.clone();
        self.push(Role::User, text.to_string());
        self.sending = true;
        Some(PendingSend { history, message: text.to_string() })
    }

    /// Append the tutor's reply and reopen the input
    pub fn complete_send(&mut self, reply: String) {
        if !self.sending {
            tracing::warn!(topic = %self.topic_id, "reply arrived with no send outstanding");
            return;
        }
        self.push(Role::Model, reply);
        self.sending = false;
    }

    fn push(&mut self, role: Role, text: String) {
        let id = format!("{}-{}", self.topic_id, self.next_seq);
        self.next_seq += 1;
        self.messages.push(ChatMessage { id, role, text, timestamp: now_millis() });
    }
}

/// Opening message naming the lesson
pub fn greeting(topic_title: &str) -> String {
    format!(
        "أهلاً بك يا طالب العلم. أنا مساعدك الذكي في درس \"{}\". اسألني عما أشكل عليك في هذا الموضوع.",
        topic_title
    )
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::Category;

    fn topic() -> Topic {
        Topic::leaf("qiyas", "القياس", "أركانه وشروطه.", Category::Sources)
    }

    #[test]
    fn new_session_has_single_greeting() {
        let chat = ChatSession::new(&topic());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Model);
        assert!(chat.messages()[0].text.contains("القياس"));
        assert!(!chat.is_sending());
    }

    #[test]
    fn blank_messages_are_ignored() {
        let mut chat = ChatSession::new(&topic());
        assert!(chat.begin_send("").is_none());
        assert!(chat.begin_send("   ").is_none());
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_sending());
    }

    #[test]
    fn send_appends_user_message_immediately() {
        let mut chat = ChatSession::new(&topic());
        let pending = chat.begin_send("  ما العلة؟ ").unwrap();

        assert_eq!(pending.message, "ما العلة؟");
        assert_eq!(pending.history.len(), 1);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, Role::User);
        assert!(chat.is_sending());
    }

    #[test]
    fn second_send_while_outstanding_is_ignored() {
        let mut chat = ChatSession::new(&topic());
        chat.begin_send("first").unwrap();
        assert!(chat.begin_send("second").is_none());
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn complete_send_appends_reply() {
        let mut chat = ChatSession::new(&topic());
        chat.begin_send("question").unwrap();
        chat.complete_send("answer".into());

        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[2].role, Role::Model);
        assert_eq!(chat.messages()[2].text, "answer");
        assert!(!chat.is_sending());

        let pending = chat.begin_send("follow up").unwrap();
        assert_eq!(pending.history.len(), 3);
    }

    #[test]
    fn unexpected_reply_is_dropped() {
        let mut chat = ChatSession::new(&topic());
        chat.complete_send("stray".into());
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn timestamps_are_epoch_millis() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
        let chat = ChatSession::new(&topic());
        assert!(chat.messages()[0].timestamp > 1_577_836_800_000);
    }

    #[test]
    fn message_ids_are_unique() {
        let mut chat = ChatSession::new(&topic());
        chat.begin_send("a").unwrap();
        chat.complete_send("b".into());
        let mut ids: Vec<_> = chat.messages().iter().map(|m| m.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
