//! Main screen: mode tabs, sidebar, active panel and status line

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Tabs},
};

use super::{View, chat_panel, lesson, quiz_panel, sidebar, status_line};
use crate::app::input::KeyContext;
use crate::app::state::{Focus, UiState};
use crate::session::AppMode;
use crate::theme::Theme;

/// Minimum width for the docked sidebar
const SIDEBAR_MIN_WIDTH: u16 = 28;

/// Widest the overlay sidebar gets
const OVERLAY_MAX_WIDTH: u16 = 40;

/// Draw the main screen
pub fn draw(frame: &mut Frame, view: &View<'_>, ui: &mut UiState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [tabs_area, body_area, status_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)]).areas(area);

    draw_tabs(frame, tabs_area, view.mode, theme);

    let navigation = view.navigation;
    let sidebar_focused = ui.focus == Focus::Sidebar && navigation.sidebar_visible();
    let (docked, main_area) = body_layout(body_area, navigation.is_narrow());

    draw_mode_panel(frame, main_area, view, ui, theme, !sidebar_focused);

    if let Some(sidebar_area) = docked {
        sidebar::draw(frame, sidebar_area, view, ui, theme, sidebar_focused);
    } else if navigation.sidebar_visible() {
        let overlay = overlay_area(body_area);
        frame.render_widget(Clear, overlay);
        sidebar::draw(frame, overlay, view, ui, theme, sidebar_focused);
    }

    let context = if sidebar_focused { KeyContext::Sidebar } else { KeyContext::for_mode(view.mode) };
    status_line::draw(frame, status_area, &ui.status, context, theme);
}

fn draw_tabs(frame: &mut Frame, area: Rect, mode: AppMode, theme: &Theme) {
    let titles: Vec<Line> = AppMode::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| Line::from(format!(" {} {} ", i + 1, m.label())))
        .collect();
    let selected = AppMode::ALL.iter().position(|m| *m == mode).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        )
        .style(Style::default().fg(theme.fg_muted))
        .highlight_style(Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
        .divider("│");

    frame.render_widget(tabs, area);
}

fn draw_mode_panel(frame: &mut Frame, area: Rect, view: &View<'_>, ui: &mut UiState, theme: &Theme, focused: bool) {
    match view.mode {
        AppMode::Learn => lesson::draw(frame, area, view, ui, theme, focused),
        AppMode::Chat => chat_panel::draw(frame, area, view, ui, theme, focused),
        AppMode::Quiz => quiz_panel::draw(frame, area, view, ui.quiz_cursor, theme, focused),
    }
}

/// Split the body into an optional docked sidebar and the main panel
fn body_layout(area: Rect, narrow: bool) -> (Option<Rect>, Rect) {
    if narrow {
        return (None, area);
    }

    let sidebar_width = (area.width / 4).max(SIDEBAR_MIN_WIDTH);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(30)])
        .split(area);
    (Some(chunks[0]), chunks[1])
}

/// Left-hand overlay used when the terminal is narrow
fn overlay_area(body: Rect) -> Rect {
    let width = (body.width * 3 / 4).min(OVERLAY_MAX_WIDTH);
    Rect { width, ..body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum;
    use crate::session::{NavigationState, TopicSession};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn wide_layout_docks_sidebar() {
        let (sidebar, main) = body_layout(Rect::new(0, 0, 120, 40), false);
        let sidebar = sidebar.unwrap();
        assert_eq!(sidebar.width, 30);
        assert_eq!(main.x, 30);
    }

    #[test]
    fn narrow_layout_gives_main_full_width() {
        let area = Rect::new(0, 0, 80, 40);
        let (sidebar, main) = body_layout(area, true);
        assert!(sidebar.is_none());
        assert_eq!(main, area);
        assert_eq!(overlay_area(area).width, 40);
    }

    fn render(width: u16, narrow: bool, mode: AppMode) {
        let curriculum = curriculum::builtin();
        let mut navigation = NavigationState::new(curriculum).unwrap();
        navigation.set_narrow(narrow);
        let session = TopicSession::new(curriculum.find("def").unwrap().clone(), 0);
        let view = View { curriculum, navigation: &navigation, session: &session, mode };
        let mut ui = UiState::default();

        let mut terminal = Terminal::new(TestBackend::new(width, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &view, &mut ui, &Theme::default())).unwrap();
        if !narrow {
            assert!(ui.sidebar_height > 0);
        }
    }

    #[test]
    fn every_mode_renders_wide_and_narrow() {
        for mode in AppMode::ALL {
            render(120, false, mode);
            render(60, true, mode);
        }
    }
}
