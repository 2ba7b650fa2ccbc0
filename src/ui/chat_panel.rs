//! Tutor chat panel

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::{Options, wrap};

use super::View;
use super::layout::{draw_scrollbar, panel};
use super::lesson::render_blocks;
use crate::app::state::{InputLine, UiState};
use crate::content::parse_blocks;
use crate::session::{ChatMessage, ChatSession, Role};
use crate::theme::Theme;

/// Draw the thread and the input line
pub fn draw(frame: &mut Frame, area: Rect, view: &View<'_>, ui: &mut UiState, theme: &Theme, focused: bool) {
    let [thread_area, input_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

    let block = panel(" المساعد الأصولي ", focused, theme);
    let inner = block.inner(thread_area);
    frame.render_widget(block, thread_area);

    let content_area = Rect { width: inner.width.saturating_sub(1), ..inner };
    let scrollbar_area = Rect { x: inner.x + inner.width.saturating_sub(1), width: 1, ..inner };

    let chat = &view.session.chat;
    let lines = thread_lines(chat, theme, content_area.width.saturating_sub(1) as usize);

    ui.chat_scroll.update(lines.len(), content_area.height as usize);
    let offset = ui.chat_scroll.offset;
    let total = lines.len();
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(content_area.height as usize).collect();
    frame.render_widget(Paragraph::new(visible), content_area);
    draw_scrollbar(frame, scrollbar_area, offset, total, theme);

    draw_input(frame, input_area, &ui.input, chat.is_sending(), theme, focused);
}

/// Every message with a speaker line, plus a typing indicator while sending
pub fn thread_lines(chat: &ChatSession, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for message in chat.messages() {
        message_lines(&mut lines, message, theme, width);
        lines.push(Line::from(""));
    }

    if chat.is_sending() {
        lines.push(Line::from(Span::styled(
            "الأصولي يكتب...",
            Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn message_lines(lines: &mut Vec<Line<'static>>, message: &ChatMessage, theme: &Theme, width: usize) {
    match message.role {
        Role::User => {
            lines.push(Line::from(Span::styled(
                "أنت",
                Style::default().fg(theme.user_bubble).add_modifier(Modifier::BOLD),
            )));
            let style = Style::default().fg(theme.fg_secondary);
            for source in message.text.lines() {
                let wrapped = if width > 2 {
                    wrap(source, Options::new(width - 2)).into_iter().map(|s| s.to_string()).collect()
                } else {
                    vec![source.to_string()]
                };
                for part in wrapped {
                    lines.push(Line::from(vec![Span::raw("  "), Span::styled(part, style)]));
                }
            }
        }
        Role::Model => {
            lines.push(Line::from(Span::styled(
                "الأصولي",
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            )));
            lines.extend(render_blocks(&parse_blocks(&message.text), theme, width));
        }
    }
}

fn draw_input(frame: &mut Frame, area: Rect, input: &InputLine, sending: bool, theme: &Theme, focused: bool) {
    let border_color = if focused && !sending { theme.border_focused } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if sending {
        Line::from(Span::styled("انتظر الرد...", Style::default().fg(theme.fg_muted)))
    } else if input.text().is_empty() {
        let mut line = build_line_with_cursor("", 0, Style::default(), theme);
        line.spans.push(Span::styled("اكتب سؤالك هنا...", Style::default().fg(theme.fg_muted)));
        line
    } else {
        let style = Style::default().fg(theme.fg_primary);
        build_line_with_cursor(input.text(), input.cursor(), style, theme)
    };

    frame.render_widget(Paragraph::new(line), inner);
}

/// Build a line with a visible cursor
fn build_line_with_cursor(text: &str, cursor_pos: usize, base_style: Style, theme: &Theme) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    // Cursor character (or space if at end)
    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style = Style::default().fg(theme.bg_primary).bg(theme.accent_primary);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::{Category, Topic};
    use pretty_assertions::assert_eq;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn chat() -> ChatSession {
        ChatSession::new(&Topic::leaf("qiyas", "القياس", "", Category::Sources))
    }

    #[test]
    fn greeting_is_attributed_to_tutor() {
        let lines = thread_lines(&chat(), &Theme::default(), 60);
        assert_eq!(text(&lines[0]), "الأصولي");
        assert!(lines.iter().any(|l| text(l).contains("القياس")));
    }

    #[test]
    fn typing_indicator_while_sending() {
        let mut chat = chat();
        chat.begin_send("ما أركان القياس؟").unwrap();
        let lines = thread_lines(&chat, &Theme::default(), 60);

        assert!(lines.iter().any(|l| text(l) == "أنت"));
        assert_eq!(text(lines.last().unwrap()), "الأصولي يكتب...");
    }

    #[test]
    fn long_user_message_wraps() {
        let mut chat = chat();
        chat.begin_send("كلمة كلمة كلمة كلمة كلمة كلمة").unwrap();
        chat.complete_send("نعم".into());

        let lines = thread_lines(&chat, &Theme::default(), 14);
        let user_rows = lines.iter().filter(|l| text(l).starts_with("  كلمة")).count();
        assert!(user_rows > 1);
    }

    #[test]
    fn cursor_in_middle_splits_line() {
        let line = build_line_with_cursor("abc", 1, Style::default(), &Theme::default());
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "b");
    }

    #[test]
    fn cursor_at_end_is_a_space() {
        let line = build_line_with_cursor("abc", 3, Style::default(), &Theme::default());
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].content, " ");
    }
}
