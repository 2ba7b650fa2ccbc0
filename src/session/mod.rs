//! Per-topic session state
//!
//! Everything the learner does with a topic lives in a [`TopicSession`] that is
//! replaced wholesale when another topic is selected.

pub mod chat;
pub mod lesson;
pub mod navigation;
pub mod quiz;

use tokio_util::sync::CancellationToken;

use crate::curriculum::Topic;

pub use chat::{ChatMessage, ChatSession, PendingSend, Role};
pub use lesson::LessonState;
pub use navigation::{NavigationState, TreeItem};
pub use quiz::{QuizQuestion, QuizSession, QuizStatus};

/// Identifies the topic session a gateway request was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    /// Topic selected when the request was issued
    pub topic_id: String,
    /// Selection counter; re-selecting the same topic yields a new epoch
    pub epoch: u64,
}

/// The three interaction modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Learn,
    Chat,
    Quiz,
}

impl AppMode {
    pub const ALL: [AppMode; 3] = [AppMode::Learn, AppMode::Chat, AppMode::Quiz];

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Learn => "الدرس",
            Self::Chat => "المساعد",
            Self::Quiz => "الاختبار",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Learn => Self::Chat,
            Self::Chat => Self::Quiz,
            Self::Quiz => Self::Learn,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Learn => Self::Quiz,
            Self::Chat => Self::Learn,
            Self::Quiz => Self::Chat,
        }
    }
}

/// State of every mode for the selected topic
#[derive(Debug)]
pub struct TopicSession {
    /// The selected lesson
    pub topic: Topic,
    /// Tag attached to requests issued for this session
    pub tag: RequestTag,
    /// Cancelled when the session is replaced
    pub cancel: CancellationToken,
    pub lesson: LessonState,
    pub chat: ChatSession,
    pub quiz: QuizSession,
}

impl TopicSession {
    /// Fresh session: greeting-only chat, quiz not loaded, lesson not requested
    pub fn new(topic: Topic, epoch: u64) -> Self {
        let tag = RequestTag { topic_id: topic.id.clone(), epoch };
        let chat = ChatSession::new(&topic);
        Self {
            topic,
            tag,
            cancel: CancellationToken::new(),
            lesson: LessonState::default(),
            chat,
            quiz: QuizSession::new(),
        }
    }
}

impl Drop for TopicSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
