//! Quiz session state machine
//!
//! `NotLoaded → Loading → Ready → Completed`, with each question moving from
//! unanswered to answered exactly once.

use serde::{Deserialize, Serialize};

/// Number of options every question carries
pub const OPTION_COUNT: usize = 4;

/// A generated multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Exactly four answer options
    pub options: Vec<String>,
    /// Index of the correct option (0-3)
    pub correct_answer_index: usize,
    /// Why the correct answer is correct
    pub explanation: String,
}

impl QuizQuestion {
    /// Four options and an in-range answer index
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTION_COUNT && self.correct_answer_index < OPTION_COUNT
    }
}

/// Lifecycle of a quiz session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizStatus {
    /// Quiz mode not entered yet for this topic
    #[default]
    NotLoaded,
    /// Questions requested, not yet received
    Loading,
    /// Questions received (possibly none)
    Ready,
    /// Every question answered
    Completed,
}

/// Progress through one generated quiz
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    status: QuizStatus,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    selected_option: Option<usize>,
    score: usize,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> QuizStatus {
        self.status
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether questions were received but there are none
    pub fn has_no_questions(&self) -> bool {
        self.status == QuizStatus::Ready && self.questions.is_empty()
    }

    /// The question being shown
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.status == QuizStatus::Ready { self.questions.get(self.current_index) } else { None }
    }

    /// Whether the current question has been answered
    pub fn is_answered(&self) -> bool {
        self.selected_option.is_some()
    }

    /// Whether entering Quiz mode should fetch questions
    pub fn needs_load(&self) -> bool {
        self.status == QuizStatus::NotLoaded || self.has_no_questions()
    }

    /// Reset progress and wait for questions.
    ///
    /// Returns false if a load is already outstanding.
    pub fn begin_loading(&mut self) -> bool {
        if self.status == QuizStatus::Loading {
            return false;
        }
        *self = Self { status: QuizStatus::Loading, ..Self::default() };
        true
    }

    /// Receive generated questions
    pub fn load(&mut self, questions: Vec<QuizQuestion>) {
        if self.status != QuizStatus::Loading {
            tracing::warn!(status = ?self.status, "quiz questions arrived outside loading");
            return;
        }
        self.questions = questions;
        self.status = QuizStatus::Ready;
    }

    /// Answer the current question. Only the first answer counts.
    pub fn select_option(&mut self, index: usize) -> bool {
        let Some((option_count, correct)) =
            self.current_question().map(|q| (q.options.len(), q.correct_answer_index))
        else {
            return false;
        };
        if self.selected_option.is_some() || index >= option_count {
            return false;
        }

        if index == correct {
            self.score += 1;
        }
        self.selected_option = Some(index);
        true
    }

    /// Move past an answered question
    pub fn advance(&mut self) -> bool {
        if self.status != QuizStatus::Ready || self.selected_option.is_none() {
            return false;
        }

        if self.current_index + 1 >= self.questions.len() {
            self.status = QuizStatus::Completed;
        } else {
            self.current_index += 1;
            self.selected_option = None;
        }
        true
    }

    /// Start over with freshly generated questions
    pub fn restart(&mut self) -> bool {
        if self.status == QuizStatus::Completed || self.has_no_questions() {
            self.begin_loading()
        } else {
            false
        }
    }

    /// Score and question count once completed
    pub fn final_score(&self) -> Option<(usize, usize)> {
        (self.status == QuizStatus::Completed).then_some((self.score, self.questions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("q{correct}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer_index: correct,
            explanation: "because".into(),
        }
    }

    fn ready(questions: Vec<QuizQuestion>) -> QuizSession {
        let mut quiz = QuizSession::new();
        assert!(quiz.begin_loading());
        quiz.load(questions);
        quiz
    }

    #[test]
    fn starts_not_loaded() {
        let quiz = QuizSession::new();
        assert_eq!(quiz.status(), QuizStatus::NotLoaded);
        assert!(quiz.needs_load());
        assert!(quiz.current_question().is_none());
    }

    #[test]
    fn begin_loading_refuses_duplicate() {
        let mut quiz = QuizSession::new();
        assert!(quiz.begin_loading());
        assert!(!quiz.begin_loading());
    }

    #[test]
    fn empty_result_is_terminal_no_questions() {
        let quiz = ready(Vec::new());
        assert!(quiz.has_no_questions());
        assert!(quiz.needs_load());
        assert!(quiz.current_question().is_none());
    }

    #[test]
    fn select_option_is_idempotent() {
        let mut quiz = ready(vec![question(1)]);
        assert!(quiz.select_option(1));
        assert!(!quiz.select_option(2));
        assert_eq!(quiz.selected_option(), Some(1));
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn wrong_answer_does_not_score() {
        let mut quiz = ready(vec![question(0)]);
        quiz.select_option(3);
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut quiz = ready(vec![question(0)]);
        assert!(!quiz.select_option(4));
        assert!(!quiz.is_answered());
    }

    #[test]
    fn advance_requires_answer() {
        let mut quiz = ready(vec![question(0), question(1)]);
        assert!(!quiz.advance());
        assert_eq!(quiz.current_index(), 0);

        quiz.select_option(0);
        assert!(quiz.advance());
        assert_eq!(quiz.current_index(), 1);
        assert!(!quiz.is_answered());
    }

    #[test]
    fn last_advance_completes() {
        let mut quiz = ready(vec![question(2)]);
        quiz.select_option(2);
        assert!(quiz.advance());
        assert_eq!(quiz.status(), QuizStatus::Completed);
        assert_eq!(quiz.final_score(), Some((1, 1)));
        assert!(!quiz.advance());
    }

    #[test]
    fn restart_only_from_completed_or_empty() {
        let mut quiz = ready(vec![question(0)]);
        assert!(!quiz.restart());

        quiz.select_option(0);
        quiz.advance();
        assert!(quiz.restart());
        assert_eq!(quiz.status(), QuizStatus::Loading);
        assert_eq!(quiz.score(), 0);
        assert!(quiz.questions().is_empty());

        let mut empty = ready(Vec::new());
        assert!(empty.restart());
    }

    #[test]
    fn load_outside_loading_is_ignored() {
        let mut quiz = QuizSession::new();
        quiz.load(vec![question(0)]);
        assert_eq!(quiz.status(), QuizStatus::NotLoaded);
    }

    #[test]
    fn well_formed_checks_shape() {
        assert!(question(3).is_well_formed());
        let mut bad = question(0);
        bad.options.pop();
        assert!(!bad.is_well_formed());
        assert!(!question(4).is_well_formed());
    }

    proptest! {
        #[test]
        fn score_counts_correct_answers(
            answers in proptest::collection::vec((0usize..4, 0usize..4), 1..8)
        ) {
            let questions = answers.iter().map(|(correct, _)| question(*correct)).collect();
            let mut quiz = ready(questions);
            let mut expected = 0;

            for (k, (correct, picked)) in answers.iter().enumerate() {
                quiz.select_option(*picked);
                if picked == correct {
                    expected += 1;
                }
                prop_assert_eq!(quiz.score(), expected);
                prop_assert!(quiz.score() <= k + 1);
                quiz.advance();
            }
            prop_assert_eq!(quiz.final_score(), Some((expected, answers.len())));
        }
    }
}
