//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;

/// Key reference shown by `?`
const HELP: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "تبديل الوضع"),
    ("1 2 3", "الدرس / المساعد / الاختبار"),
    ("[", "إظهار الفهرس أو إخفاؤه"),
    ("h / Esc", "الانتقال إلى الفهرس"),
    ("j / k", "تحريك المؤشر أو التمرير"),
    ("Enter", "فتح الدرس أو تأكيد الإجابة"),
    ("r", "إعادة تحميل الدرس أو الاختبار"),
    ("a b c d", "اختيار إجابة"),
    ("n", "السؤال التالي"),
    ("q / Ctrl+C", "خروج"),
];

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Bordered panel, highlighted when focused
pub fn panel<'a>(title: impl Into<Line<'a>>, focused: bool, theme: &Theme) -> Block<'a> {
    let border_color = if focused { theme.border_focused } else { theme.border };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary))
}

/// Draw the key reference overlay
pub fn draw_help(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" المفاتيح ")
        .title_bottom(Line::from(" أي مفتاح للإغلاق ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{keys:>16}  "),
                    Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(theme.fg_primary)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

/// Draw a one-column scrollbar
pub fn draw_scrollbar(
    frame: &mut Frame,
    area: Rect,
    scroll_offset: usize,
    total_lines: usize,
    theme: &Theme,
) {
    let height = area.height as usize;
    if total_lines <= height || height == 0 {
        return;
    }

    let thumb_height = (height * height / total_lines).max(1);
    let max_scroll = total_lines - height;
    let thumb_top = (height - thumb_height) * scroll_offset.min(max_scroll) / max_scroll;

    for i in 0..height {
        let on_thumb = i >= thumb_top && i < thumb_top + thumb_height;
        let (ch, color) = if on_thumb { ("█", theme.accent_primary) } else { ("░", theme.bg_tertiary) };
        frame.render_widget(
            Paragraph::new(ch).style(Style::default().fg(color)),
            Rect { x: area.x, y: area.y.saturating_add(i as u16), width: 1, height: 1 },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 50, parent);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
        assert!(rect.x >= 20 && rect.y >= 10);
    }

    #[test]
    fn help_overlay_renders() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| draw_help(frame, &Theme::default())).unwrap();
    }

    #[test]
    fn scrollbar_skips_short_content() {
        let mut terminal = Terminal::new(TestBackend::new(10, 10)).unwrap();
        terminal
            .draw(|frame| draw_scrollbar(frame, Rect::new(9, 0, 1, 10), 0, 5, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(9, 0)].symbol(), " ");
    }
}
