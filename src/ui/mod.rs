//! UI rendering components

pub mod chat_panel;
pub mod layout;
pub mod lesson;
pub mod main_screen;
pub mod quiz_panel;
pub mod sidebar;
pub mod status_line;

use ratatui::Frame;

use crate::app::Controller;
use crate::app::state::UiState;
use crate::curriculum::Curriculum;
use crate::gateway::Gateway;
use crate::session::{AppMode, NavigationState, TopicSession};
use crate::theme::Theme;

/// Read-only snapshot of the domain state for one frame
pub struct View<'a> {
    pub curriculum: &'a Curriculum,
    pub navigation: &'a NavigationState,
    pub session: &'a TopicSession,
    pub mode: AppMode,
}

impl<'a> View<'a> {
    pub fn of<G: Gateway>(controller: &'a Controller<G>) -> Self {
        Self {
            curriculum: controller.curriculum(),
            navigation: controller.navigation(),
            session: controller.session(),
            mode: controller.mode(),
        }
    }
}

/// Main draw function
pub fn draw(frame: &mut Frame, view: &View<'_>, ui: &mut UiState, theme: &Theme) {
    main_screen::draw(frame, view, ui, theme);

    if ui.show_help {
        layout::draw_help(frame, theme);
    }
}
