//! Lesson renderer

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::View;
use super::layout::{draw_scrollbar, panel};
use crate::app::state::UiState;
use crate::content::{ContentBlock, InlineSpan};
use crate::session::LessonState;
use crate::theme::Theme;

/// Draw the lesson for the selected topic
pub fn draw(frame: &mut Frame, area: Rect, view: &View<'_>, ui: &mut UiState, theme: &Theme, focused: bool) {
    let topic = &view.session.topic;
    let block = panel(format!(" {} ", topic.title), focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve 1 column for scrollbar
    let content_area = Rect { width: inner.width.saturating_sub(1), ..inner };
    let scrollbar_area = Rect { x: inner.x + inner.width.saturating_sub(1), width: 1, ..inner };
    let width = content_area.width.saturating_sub(1) as usize;

    let mut lines = vec![
        Line::from(Span::styled(topic.description.clone(), Style::default().fg(theme.fg_muted))),
        Line::from(""),
    ];

    match &view.session.lesson {
        LessonState::NotRequested | LessonState::Loading => {
            lines.push(Line::from(Span::styled(
                "جاري تحضير الدرس...",
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::ITALIC),
            )));
        }
        LessonState::Unavailable => {
            lines.push(Line::from(Span::styled(
                "لا يتوفر محتوى لهذا الدرس حالياً.",
                Style::default().fg(theme.warning),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[r] إعادة المحاولة",
                Style::default().fg(theme.fg_muted),
            )));
        }
        LessonState::Ready { blocks, .. } => {
            lines.extend(render_blocks(blocks, theme, width));
        }
    }

    ui.lesson_scroll.update(lines.len(), content_area.height as usize);
    let offset = ui.lesson_scroll.offset;
    let total = lines.len();
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(content_area.height as usize).collect();

    frame.render_widget(Paragraph::new(visible), content_area);
    draw_scrollbar(frame, scrollbar_area, offset, total, theme);
}

/// Render content blocks to styled lines
pub fn render_blocks(blocks: &[ContentBlock], theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Heading { level, text } => render_heading(&mut lines, *level, text, theme),
            ContentBlock::BoldLine { text } => {
                let style = Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD);
                lines.extend(wrap_spans(vec![Span::styled(text.clone(), style)], width));
            }
            ContentBlock::BulletItem { text } => render_bullet(&mut lines, text, theme, width),
            ContentBlock::Paragraph { spans } => {
                lines.extend(wrap_spans(inline_spans(spans, theme), width));
            }
            ContentBlock::BlankLine => lines.push(Line::from("")),
        }
    }

    lines
}

fn render_heading(lines: &mut Vec<Line<'static>>, level: u8, text: &str, theme: &Theme) {
    let style = match level {
        2 => Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        _ => Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
    };

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(text.to_string(), style)));
}

fn render_bullet(lines: &mut Vec<Line<'static>>, text: &str, theme: &Theme, width: usize) {
    let bullet = "  • ";
    let indent = "    ";
    let span = Span::styled(text.to_string(), Style::default().fg(theme.fg_primary));

    for (i, line) in wrap_spans(vec![span], width.saturating_sub(4)).into_iter().enumerate() {
        let prefix = if i == 0 {
            Span::styled(bullet, Style::default().fg(theme.accent_primary))
        } else {
            Span::raw(indent)
        };
        let mut spans = vec![prefix];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }
}

fn inline_spans(spans: &[InlineSpan], theme: &Theme) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Plain(text) => Span::styled(text.clone(), Style::default().fg(theme.fg_primary)),
            InlineSpan::Bold(text) => Span::styled(
                text.clone(),
                Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
            ),
        })
        .collect()
}

/// Word-wrap styled spans to `width` columns
pub fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(spans)];
    }

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        let style = span.style;
        for word in span.content.split_inclusive(char::is_whitespace) {
            let word_len = word.chars().count();
            if current_width + word_len > width && current_width > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
            }
            current.push(Span::styled(word.to_string(), style));
            current_width += word_len;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_blocks;
    use pretty_assertions::assert_eq;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn heading_is_preceded_by_space() {
        let lines = render_blocks(&parse_blocks("## مقدمة"), &Theme::default(), 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[1]), "مقدمة");
    }

    #[test]
    fn bold_span_keeps_its_style() {
        let theme = Theme::default();
        let lines = render_blocks(&parse_blocks("القياس **حجة** عند الجمهور"), &theme, 80);
        assert_eq!(lines.len(), 1);
        let bold = lines[0].spans.iter().find(|s| s.content.contains("حجة")).unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn bullets_wrap_with_indent() {
        let lines = render_blocks(&parse_blocks("- أ ب ج د ه و ز ح ط"), &Theme::default(), 10);
        assert!(lines.len() > 1);
        assert!(text(&lines[0]).starts_with("  • "));
        assert!(text(&lines[1]).starts_with("    "));
    }

    #[test]
    fn blank_lines_are_kept() {
        let lines = render_blocks(&parse_blocks("أ\n\nب"), &Theme::default(), 40);
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[1]), "");
    }

    #[test]
    fn wrap_spans_breaks_on_words() {
        let lines = wrap_spans(vec![Span::raw("one two three")], 8);
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[0]), "one two ");
    }

    #[test]
    fn wrap_spans_zero_width_is_single_line() {
        assert_eq!(wrap_spans(vec![Span::raw("a b")], 0).len(), 1);
    }

    #[test]
    fn empty_input_yields_one_line() {
        assert_eq!(wrap_spans(Vec::new(), 10).len(), 1);
    }
}
