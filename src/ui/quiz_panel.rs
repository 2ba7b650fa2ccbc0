//! Quiz panel component

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::View;
use super::layout::panel;
use crate::session::{QuizSession, QuizStatus};
use crate::theme::Theme;

/// Option labels in display order
const LETTERS: [&str; 4] = ["أ", "ب", "ج", "د"];

/// Draw the quiz for the selected topic
pub fn draw(frame: &mut Frame, area: Rect, view: &View<'_>, cursor: usize, theme: &Theme, focused: bool) {
    let quiz = &view.session.quiz;

    let title = match quiz.status() {
        QuizStatus::Completed => " اكتمل الاختبار ".to_string(),
        _ => format!(" اختبر نفسك: {} ", view.session.topic.title),
    };
    let block = panel(title, focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (lines, alignment) = match quiz.status() {
        QuizStatus::NotLoaded | QuizStatus::Loading => (loading_lines(theme), Alignment::Center),
        QuizStatus::Ready if quiz.has_no_questions() => (empty_lines(theme), Alignment::Center),
        QuizStatus::Completed => (result_lines(quiz, theme), Alignment::Center),
        QuizStatus::Ready => (question_lines(quiz, cursor, theme), Alignment::Left),
    };

    let para = Paragraph::new(lines).alignment(alignment).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn loading_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("جاري إعداد الاختبار...", Style::default().fg(theme.fg_primary))),
    ]
}

fn empty_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "لم نتمكن من توليد أسئلة لهذا الموضوع حالياً. حاول مرة أخرى لاحقاً.",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(Span::styled("[r] إعادة المحاولة", Style::default().fg(theme.fg_muted))),
    ]
}

/// Score summary once every question is answered
pub fn result_lines(quiz: &QuizSession, theme: &Theme) -> Vec<Line<'static>> {
    let (score, total) = quiz.final_score().unwrap_or((quiz.score(), quiz.questions().len()));

    vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "اكتمل الاختبار!",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("نتيجتك هي: ", Style::default().fg(theme.fg_primary)),
            Span::styled(
                score.to_string(),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" من {total}"), Style::default().fg(theme.fg_primary)),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("[Enter] إعادة الاختبار", Style::default().fg(theme.fg_muted))),
    ]
}

/// The current question, its options and, once answered, the explanation
pub fn question_lines(quiz: &QuizSession, cursor: usize, theme: &Theme) -> Vec<Line<'static>> {
    let Some(question) = quiz.current_question() else {
        return Vec::new();
    };
    let total = quiz.questions().len();
    let answered = quiz.selected_option();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("السؤال {} من {}", quiz.current_index() + 1, total),
                Style::default().fg(theme.fg_muted),
            ),
            Span::raw("    "),
            Span::styled(format!("النقاط: {}", quiz.score()), Style::default().fg(theme.accent_secondary)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            question.question.clone(),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, option) in question.options.iter().enumerate() {
        let letter = LETTERS.get(i).copied().unwrap_or("-");
        let (marker, style) = match answered {
            Some(_) if i == question.correct_answer_index => {
                ("✓", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
            }
            Some(picked) if i == picked => ("✗", Style::default().fg(theme.error)),
            Some(_) => (" ", Style::default().fg(theme.fg_muted)),
            None if i == cursor => {
                ("●", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
            }
            None => ("○", Style::default().fg(theme.fg_primary)),
        };

        lines.push(Line::from(Span::styled(format!("  {marker} {letter}) {option}"), style)));
        lines.push(Line::from(""));
    }

    if answered.is_some() {
        lines.push(Line::from(Span::styled(
            "الشرح:",
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            question.explanation.clone(),
            Style::default().fg(theme.fg_primary),
        )));
        lines.push(Line::from(""));

        let next = if quiz.current_index() + 1 == total { "إظهار النتائج" } else { "السؤال التالي" };
        lines.push(Line::from(Span::styled(
            format!("[Enter] {next}"),
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[j/k] تحديد    [Enter] تأكيد    [a-d] اختيار مباشر",
            Style::default().fg(theme.fg_muted),
        )));
    }

    lines
}
