//! Status line at the bottom of the screen

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::input::KeyContext;
use crate::app::state::StatusLine;
use crate::theme::Theme;

/// Draw the current message, or key hints for the context
pub fn draw(frame: &mut Frame, area: Rect, status: &StatusLine, context: KeyContext, theme: &Theme) {
    let line = match &status.message {
        Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(theme.accent_secondary))),
        None => Line::from(Span::styled(hint(context), Style::default().fg(theme.fg_muted))),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Key hints shown when there is no message
pub fn hint(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Sidebar => "j/k تنقل  Enter فتح  Tab الوضع  ? مساعدة  q خروج",
        KeyContext::Learn => "j/k تمرير  r إعادة التحميل  h الفهرس  Tab الوضع  ? مساعدة",
        KeyContext::Chat => "Enter إرسال  Esc الفهرس  Tab الوضع  Ctrl+C خروج",
        KeyContext::Quiz => "a-d اختيار  Enter تأكيد  n التالي  r إعادة  Tab الوضع",
    }
}
