//! Curriculum tree sidebar

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::View;
use super::layout::panel;
use crate::app::state::UiState;
use crate::session::TreeItem;
use crate::theme::Theme;

const EXPANDED: &str = "▼";
const COLLAPSED: &str = "▶";
const LESSON: &str = "•";

/// Draw the sidebar and record its height for cursor scrolling
pub fn draw(frame: &mut Frame, area: Rect, view: &View<'_>, ui: &mut UiState, theme: &Theme, focused: bool) {
    let block = panel(" أصول الفقه ", focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tagline_area, tree_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);

    let tagline = Paragraph::new(Line::from(Span::styled(
        "رحلة في فهم استنباط الأحكام",
        Style::default().fg(theme.fg_muted),
    )));
    frame.render_widget(tagline, tagline_area);

    ui.sidebar_height = tree_area.height as usize;

    let lines = tree_lines(view, theme, focused);
    let visible: Vec<Line> =
        lines.into_iter().skip(view.navigation.scroll_offset()).take(tree_area.height as usize).collect();
    frame.render_widget(Paragraph::new(visible), tree_area);
}

/// One line per visible tree row
pub fn tree_lines(view: &View<'_>, theme: &Theme, focused: bool) -> Vec<Line<'static>> {
    let navigation = view.navigation;
    let cursor = navigation.cursor();

    navigation
        .visible_items(view.curriculum)
        .into_iter()
        .enumerate()
        .map(|(row, item)| {
            let topic = item.topic();
            let text = match item {
                TreeItem::Category(_) => {
                    let icon = if navigation.is_expanded(&topic.id) { EXPANDED } else { COLLAPSED };
                    format!("{icon} {}", topic.title)
                }
                TreeItem::Lesson(_) => format!("   {LESSON} {}", topic.title),
            };

            let style = if row == cursor && focused {
                Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
            } else if topic.id == navigation.selected_id() {
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD)
            } else if matches!(item, TreeItem::Category(_)) {
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };

            Line::from(Span::styled(text, style))
        })
        .collect()
}
