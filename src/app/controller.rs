//! Mode controller
//!
//! Owns navigation, the active mode and the current topic session. Gateway
//! calls run as tokio tasks; their results come back as [`Completion`]s over a
//! channel and are applied only if still addressed to the current session.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::curriculum::{Curriculum, CurriculumError};
use crate::gateway::Gateway;
use crate::session::{
    AppMode, NavigationState, QuizQuestion, RequestTag, TopicSession, TreeItem,
};

/// Result of a gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Lesson(String),
    Quiz(Vec<QuizQuestion>),
    Reply(String),
}

/// A gateway result addressed to the session that asked for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub tag: RequestTag,
    pub payload: Payload,
}

/// Selection, mode and session coordinator
pub struct Controller<G: Gateway> {
    gateway: Arc<G>,
    curriculum: Curriculum,
    navigation: NavigationState,
    mode: AppMode,
    session: TopicSession,
    /// Bumped on every topic selection
    epoch: u64,
    /// Questions requested per quiz
    quiz_size: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<G: Gateway> Controller<G> {
    /// Create a controller with the first lesson selected in Learn mode.
    ///
    /// Nothing is requested until [`Controller::start`].
    pub fn new(
        gateway: Arc<G>,
        curriculum: Curriculum,
        quiz_size: usize,
    ) -> Result<Self, CurriculumError> {
        curriculum.validate()?;
        let navigation = NavigationState::new(&curriculum).ok_or(CurriculumError::Empty)?;
        let topic = curriculum.find(navigation.selected_id()).cloned().ok_or(CurriculumError::Empty)?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            gateway,
            curriculum,
            navigation,
            mode: AppMode::Learn,
            session: TopicSession::new(topic, 0),
            epoch: 0,
            quiz_size,
            tx,
            rx,
        })
    }

    /// Request the initial lesson
    pub fn start(&mut self) {
        self.request_lesson();
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationState {
        &mut self.navigation
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn session(&self) -> &TopicSession {
        &self.session
    }

    // Navigation

    pub fn toggle_category(&mut self, category_id: &str) {
        self.navigation.toggle_category(category_id);
        self.navigation.clamp_cursor(&self.curriculum);
    }

    pub fn cursor_down(&mut self) {
        self.navigation.move_down(&self.curriculum);
    }

    pub fn cursor_up(&mut self) {
        self.navigation.move_up();
    }

    /// Toggle the category or select the lesson under the cursor.
    ///
    /// Returns true when a lesson was selected.
    pub fn activate_cursor(&mut self) -> bool {
        match self.navigation.item_under_cursor(&self.curriculum) {
            Some(TreeItem::Category(category)) => {
                let id = category.id.clone();
                self.toggle_category(&id);
                false
            }
            Some(TreeItem::Lesson(topic)) => {
                let id = topic.id.clone();
                self.select_topic(&id)
            }
            None => false,
        }
    }

    /// Select a lesson: Learn mode, fresh session, lesson requested
    pub fn select_topic(&mut self, topic_id: &str) -> bool {
        let Some(topic) = self.curriculum.find(topic_id).cloned() else {
            tracing::warn!(topic = topic_id, "unknown topic");
            return false;
        };
        if !self.navigation.select_topic(&topic) {
            return false;
        }

        tracing::info!(topic = %topic.id, "topic selected");
        self.epoch += 1;
        // Dropping the old session cancels its outstanding requests.
        self.session = TopicSession::new(topic, self.epoch);
        self.mode = AppMode::Learn;
        self.request_lesson();
        true
    }

    // Modes

    /// Switch mode, fetching the mode's content if it has none yet
    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
        match mode {
            AppMode::Learn if self.session.lesson.needs_load() => {
                self.request_lesson();
            }
            AppMode::Quiz if self.session.quiz.needs_load() => {
                self.request_quiz();
            }
            _ => {}
        }
    }

    /// Ask for the lesson again unless a request is outstanding
    pub fn reload_lesson(&mut self) -> bool {
        self.request_lesson()
    }

    // Chat

    /// Send a chat message. Blank text or an outstanding send is ignored.
    pub fn send_message(&mut self, text: &str) -> bool {
        let Some(pending) = self.session.chat.begin_send(text) else {
            return false;
        };

        let gateway = Arc::clone(&self.gateway);
        let title = self.session.topic.title.clone();
        self.dispatch(async move {
            Payload::Reply(gateway.produce_reply(&pending.history, &pending.message, &title).await)
        });
        true
    }

    // Quiz

    pub fn select_option(&mut self, index: usize) -> bool {
        self.session.quiz.select_option(index)
    }

    pub fn advance_quiz(&mut self) -> bool {
        self.session.quiz.advance()
    }

    /// Fetch a fresh question set after completion or an empty result
    pub fn restart_quiz(&mut self) -> bool {
        if !self.session.quiz.restart() {
            return false;
        }
        self.spawn_quiz();
        true
    }

    // Completions

    /// Apply a completion if it belongs to the current session
    pub fn apply(&mut self, completion: Completion) -> bool {
        if completion.tag != self.session.tag {
            tracing::debug!(
                stale = %completion.tag.topic_id,
                current = %self.session.tag.topic_id,
                "discarding stale response"
            );
            return false;
        }

        match completion.payload {
            Payload::Lesson(text) => self.session.lesson.load(text),
            Payload::Quiz(questions) => {
                tracing::info!(count = questions.len(), "quiz ready");
                self.session.quiz.load(questions);
            }
            Payload::Reply(text) => self.session.chat.complete_send(text),
        }
        true
    }

    /// Apply every completion that has already arrived
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion without applying it
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    fn request_lesson(&mut self) -> bool {
        if !self.session.lesson.begin_loading() {
            return false;
        }

        let gateway = Arc::clone(&self.gateway);
        let title = self.session.topic.title.clone();
        let description = self.session.topic.description.clone();
        self.dispatch(async move {
            Payload::Lesson(gateway.produce_lesson(&title, &description).await)
        });
        true
    }

    fn request_quiz(&mut self) -> bool {
        if !self.session.quiz.begin_loading() {
            return false;
        }
        self.spawn_quiz();
        true
    }

    fn spawn_quiz(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        let title = self.session.topic.title.clone();
        let count = self.quiz_size;
        self.dispatch(async move { Payload::Quiz(gateway.produce_quiz(&title, count).await) });
    }

    /// Run a gateway call tagged with the current session
    fn dispatch<F>(&self, call: F)
    where
        F: Future<Output = Payload> + Send + 'static,
    {
        let tx = self.tx.clone();
        let tag = self.session.tag.clone();
        let cancel = self.session.cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(topic = %tag.topic_id, "request abandoned");
                }
                payload = call => {
                    // Receiver only goes away at shutdown.
                    let _ = tx.send(Completion { tag, payload });
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::curriculum;
    use crate::session::{ChatMessage, LessonState, QuizStatus, Role};

    /// Gateway answering from canned data
    #[derive(Default)]
    struct ScriptedGateway {
        quizzes: Mutex<VecDeque<Vec<QuizQuestion>>>,
        quiz_calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn with_quizzes(quizzes: Vec<Vec<QuizQuestion>>) -> Self {
            Self { quizzes: Mutex::new(quizzes.into()), ..Self::default() }
        }
    }

    impl Gateway for ScriptedGateway {
        async fn produce_lesson(&self, title: &str, _description: &str) -> String {
            format!("## {title}\n- نقطة")
        }

        async fn produce_quiz(&self, _title: &str, _count: usize) -> Vec<QuizQuestion> {
            self.quiz_calls.fetch_add(1, Ordering::SeqCst);
            self.quizzes.lock().unwrap().pop_front().unwrap_or_default()
        }

        async fn produce_reply(
            &self,
            history: &[ChatMessage],
            message: &str,
            _topic_title: &str,
        ) -> String {
            format!("{} بعد {} رسائل", message, history.len())
        }
    }

    fn question(prompt: &str, correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: prompt.to_string(),
            options: vec!["أ".into(), "ب".into(), "ج".into(), "د".into()],
            correct_answer_index: correct,
            explanation: "شرح".into(),
        }
    }

    fn controller(gateway: ScriptedGateway) -> Controller<ScriptedGateway> {
        Controller::new(Arc::new(gateway), curriculum::builtin().clone(), 3).unwrap()
    }

    /// Apply completions until `done` holds
    async fn settle<G: Gateway>(ctl: &mut Controller<G>, done: impl Fn(&Controller<G>) -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(ctl) {
                let completion = ctl.next_completion().await.unwrap();
                ctl.apply(completion);
            }
        })
        .await
        .expect("gateway completions did not settle");
    }

    #[tokio::test]
    async fn starts_on_first_lesson_in_learn_mode() {
        let mut ctl = controller(ScriptedGateway::default());
        assert_eq!(ctl.session().topic.id, "def");
        assert_eq!(ctl.mode(), AppMode::Learn);
        assert_eq!(ctl.session().lesson, LessonState::NotRequested);

        ctl.start();
        assert!(ctl.session().lesson.is_loading());
        settle(&mut ctl, |c| !c.session().lesson.is_loading()).await;

        let blocks = ctl.session().lesson.blocks().unwrap();
        assert_eq!(blocks.len(), 2);
    }

    #[tokio::test]
    async fn selecting_topic_resets_mode_and_chat() {
        let mut ctl = controller(ScriptedGateway::default());
        ctl.set_mode(AppMode::Chat);
        assert!(ctl.send_message("سؤال"));
        settle(&mut ctl, |c| !c.session().chat.is_sending()).await;
        assert_eq!(ctl.session().chat.messages().len(), 3);

        for topic in curriculum::builtin().leaves() {
            ctl.set_mode(AppMode::Quiz);
            assert!(ctl.select_topic(&topic.id));
            assert_eq!(ctl.mode(), AppMode::Learn);
            let messages = ctl.session().chat.messages();
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].role, Role::Model);
            assert!(messages[0].text.contains(&topic.title));
            assert_eq!(ctl.session().quiz.status(), QuizStatus::NotLoaded);
        }
    }

    #[tokio::test]
    async fn selecting_category_is_rejected() {
        let mut ctl = controller(ScriptedGateway::default());
        assert!(!ctl.select_topic("sources"));
        assert!(!ctl.select_topic("missing"));
        assert_eq!(ctl.session().topic.id, "def");
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let mut ctl = controller(ScriptedGateway::default());
        ctl.select_topic("qiyas");
        let stale_tag = ctl.session().tag.clone();
        ctl.set_mode(AppMode::Quiz);

        ctl.select_topic("taqlid");
        ctl.set_mode(AppMode::Quiz);
        let stale = Completion { tag: stale_tag, payload: Payload::Quiz(vec![question("q", 0)]) };

        assert!(!ctl.apply(stale));
        assert_eq!(ctl.session().quiz.status(), QuizStatus::Loading);
        assert_eq!(ctl.session().topic.id, "taqlid");
    }

    #[tokio::test]
    async fn reselecting_same_topic_invalidates_old_requests() {
        let mut ctl = controller(ScriptedGateway::default());
        ctl.start();
        let old_tag = ctl.session().tag.clone();

        ctl.select_topic("def");
        assert_eq!(ctl.session().tag.topic_id, old_tag.topic_id);
        assert_ne!(ctl.session().tag, old_tag);

        let stale = Completion { tag: old_tag, payload: Payload::Lesson("قديم".into()) };
        assert!(!ctl.apply(stale));
        assert!(ctl.session().lesson.is_loading());
    }

    #[tokio::test]
    async fn in_flight_lesson_for_previous_topic_never_lands() {
        let mut ctl = controller(ScriptedGateway::default());
        ctl.start();
        ctl.select_topic("ijma");

        settle(&mut ctl, |c| !c.session().lesson.is_loading()).await;
        match &ctl.session().lesson {
            LessonState::Ready { text, .. } => assert!(text.contains("الإجماع")),
            other => panic!("expected ready lesson, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn quiz_end_to_end_with_restart() {
        let first = vec![question("١", 0), question("٢", 1), question("٣", 2)];
        let second = vec![question("٤", 3), question("٥", 3), question("٦", 3)];
        let gateway = ScriptedGateway::with_quizzes(vec![first, second]);
        let mut ctl = controller(gateway);

        assert!(ctl.select_topic("def"));
        assert_eq!(ctl.session().topic.title, "تعريف أصول الفقه");
        ctl.set_mode(AppMode::Quiz);
        assert_eq!(ctl.session().quiz.status(), QuizStatus::Loading);
        settle(&mut ctl, |c| c.session().quiz.status() == QuizStatus::Ready).await;
        assert_eq!(ctl.session().quiz.questions().len(), 3);

        // two right, one wrong
        for pick in [0, 1, 0] {
            assert!(!ctl.advance_quiz());
            assert!(ctl.select_option(pick));
            assert!(ctl.advance_quiz());
        }
        assert_eq!(ctl.session().quiz.final_score(), Some((2, 3)));

        assert!(ctl.restart_quiz());
        assert_eq!(ctl.session().quiz.status(), QuizStatus::Loading);
        settle(&mut ctl, |c| c.session().quiz.status() == QuizStatus::Ready).await;

        let quiz = &ctl.session().quiz;
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.questions()[0].question, "٤");
        assert_eq!(ctl.gateway.quiz_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_quiz_shows_no_questions_and_retries_on_reentry() {
        let gateway = ScriptedGateway::with_quizzes(vec![Vec::new(), vec![question("q", 1)]]);
        let mut ctl = controller(gateway);

        ctl.set_mode(AppMode::Quiz);
        settle(&mut ctl, |c| c.session().quiz.status() == QuizStatus::Ready).await;
        assert!(ctl.session().quiz.has_no_questions());

        ctl.set_mode(AppMode::Learn);
        ctl.set_mode(AppMode::Quiz);
        settle(&mut ctl, |c| c.session().quiz.status() == QuizStatus::Ready).await;
        assert_eq!(ctl.session().quiz.questions().len(), 1);
    }

    #[tokio::test]
    async fn mode_switch_keeps_sessions() {
        let gateway = ScriptedGateway::with_quizzes(vec![vec![question("q", 1)]]);
        let mut ctl = controller(gateway);

        ctl.set_mode(AppMode::Quiz);
        settle(&mut ctl, |c| c.session().quiz.status() == QuizStatus::Ready).await;
        ctl.select_option(1);

        ctl.set_mode(AppMode::Chat);
        ctl.send_message("مرحبا");
        settle(&mut ctl, |c| !c.session().chat.is_sending()).await;

        ctl.set_mode(AppMode::Quiz);
        assert_eq!(ctl.session().quiz.selected_option(), Some(1));
        assert_eq!(ctl.session().quiz.score(), 1);
        ctl.set_mode(AppMode::Chat);
        assert_eq!(ctl.session().chat.messages().len(), 3);
        assert_eq!(ctl.gateway.quiz_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn chat_reply_sees_prior_history() {
        let mut ctl = controller(ScriptedGateway::default());
        ctl.set_mode(AppMode::Chat);

        assert!(!ctl.send_message("   "));
        assert!(ctl.send_message("ما العلة؟"));
        assert!(!ctl.send_message("ثانٍ"));
        settle(&mut ctl, |c| !c.session().chat.is_sending()).await;

        let last = ctl.session().chat.messages().last().unwrap();
        assert_eq!(last.role, Role::Model);
        assert_eq!(last.text, "ما العلة؟ بعد 1 رسائل");
    }

    #[tokio::test]
    async fn activate_cursor_toggles_then_selects() {
        let mut ctl = controller(ScriptedGateway::default());
        // cursor starts on the selected lesson, one row below its category
        ctl.cursor_up();
        assert!(!ctl.activate_cursor());
        assert!(!ctl.navigation().is_expanded("intro"));

        assert!(!ctl.activate_cursor());
        assert!(ctl.navigation().is_expanded("intro"));
        ctl.cursor_down();
        ctl.cursor_down();
        assert!(ctl.activate_cursor());
        assert_eq!(ctl.session().topic.id, "history");
    }

    #[tokio::test]
    async fn drain_applies_arrived_completions() {
        let mut ctl = controller(ScriptedGateway::default());
        ctl.start();
        tokio::time::timeout(Duration::from_secs(5), async {
            while ctl.drain() == 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert!(ctl.session().lesson.blocks().is_some());
    }
}
