//! Application loop and key dispatch

pub mod controller;
pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::gateway::Gateway;
use crate::session::{AppMode, QuizStatus, quiz::OPTION_COUNT};
use crate::theme::Theme;
use crate::ui::{self, View};

pub use controller::{Completion, Controller, Payload};
use input::{Action, KeyContext};
use state::{Focus, UiState};

/// Status shown while a reloaded lesson is on its way
const LESSON_LOADING: &str = "جاري تحضير الدرس...";

/// The main application
pub struct App<G: Gateway> {
    /// Application configuration
    config: Config,

    theme: Theme,

    controller: Controller<G>,

    /// Presentation state
    ui: UiState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl<G: Gateway> App<G> {
    /// Create a new application instance
    pub fn new(config: Config, controller: Controller<G>) -> Result<Self> {
        let theme = config.active_theme();
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, theme, controller, ui: UiState::default(), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        self.controller.start();

        loop {
            let width = self.terminal.size()?.width;
            self.controller.navigation_mut().set_narrow(width < self.config.narrow_width);
            if !self.controller.navigation().sidebar_visible() {
                self.ui.focus = Focus::Main;
            }

            let view = View::of(&self.controller);
            let ui_state = &mut self.ui;
            let theme = &self.theme;
            self.terminal.draw(|frame| {
                ui::draw(frame, &view, ui_state, theme);
            })?;
            let sidebar_height = self.ui.sidebar_height;
            self.controller.navigation_mut().set_visible_height(sidebar_height);

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break;
                    }
                }
            }

            self.controller.drain();
            refresh_status(&self.controller, &mut self.ui);
            // Let spawned gateway calls make progress between frames.
            tokio::task::yield_now().await;
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: event::KeyEvent) -> bool {
        if self.ui.show_help {
            self.ui.show_help = false;
            return false;
        }

        let context = key_context(&self.controller, &self.ui);
        match input::map_key(key, context) {
            Some(action) => dispatch(&mut self.controller, &mut self.ui, action),
            None => false,
        }
    }
}

impl<G: Gateway> Drop for App<G> {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Key routing for the current focus and mode
pub fn key_context<G: Gateway>(controller: &Controller<G>, ui: &UiState) -> KeyContext {
    if ui.focus == Focus::Sidebar && controller.navigation().sidebar_visible() {
        KeyContext::Sidebar
    } else {
        KeyContext::for_mode(controller.mode())
    }
}

/// Apply an action. Returns true when the app should exit.
pub fn dispatch<G: Gateway>(controller: &mut Controller<G>, ui: &mut UiState, action: Action) -> bool {
    let context = key_context(controller, ui);

    match action {
        Action::Quit => return true,
        Action::Help => ui.show_help = true,

        Action::NextMode => {
            let next = controller.mode().next();
            switch_mode(controller, ui, next);
        }
        Action::PrevMode => {
            let prev = controller.mode().prev();
            switch_mode(controller, ui, prev);
        }
        Action::SetMode(mode) => switch_mode(controller, ui, mode),

        Action::ToggleSidebar => {
            let navigation = controller.navigation_mut();
            if navigation.is_narrow() {
                navigation.toggle_sidebar();
                ui.focus = if navigation.sidebar_visible() { Focus::Sidebar } else { Focus::Main };
            } else {
                ui.focus = match ui.focus {
                    Focus::Sidebar => Focus::Main,
                    Focus::Main => Focus::Sidebar,
                };
            }
        }
        Action::FocusSidebar => {
            let navigation = controller.navigation_mut();
            if !navigation.sidebar_visible() {
                navigation.toggle_sidebar();
            }
            ui.focus = Focus::Sidebar;
        }
        Action::FocusMain => {
            let navigation = controller.navigation_mut();
            if navigation.is_narrow() && navigation.sidebar_visible() {
                navigation.toggle_sidebar();
            }
            ui.focus = Focus::Main;
        }

        Action::Up | Action::Down | Action::Top | Action::Bottom | Action::PageUp | Action::PageDown => {
            move_in(controller, ui, context, action)
        }

        Action::Activate => match context {
            KeyContext::Sidebar => {
                if controller.activate_cursor() {
                    ui.reset_for_topic();
                    ui.focus = Focus::Main;
                    ui.status.clear();
                }
            }
            KeyContext::Quiz => activate_quiz(controller, ui),
            _ => {}
        },

        Action::ReloadLesson => {
            if controller.reload_lesson() {
                ui.lesson_scroll.to_top();
                ui.status.set_message(LESSON_LOADING);
            }
        }

        Action::Insert(_)
        | Action::Backspace
        | Action::Delete
        | Action::CursorLeft
        | Action::CursorRight
        | Action::CursorStart
        | Action::CursorEnd
        | Action::Send => edit_chat(controller, ui, action),

        Action::PickOption(index) => {
            if controller.select_option(index) {
                ui.quiz_cursor = index;
            }
        }
        Action::NextQuestion => {
            if controller.advance_quiz() {
                ui.quiz_cursor = 0;
            }
        }
        Action::RestartQuiz => {
            if controller.restart_quiz() {
                ui.quiz_cursor = 0;
            }
        }
    }
    false
}

/// Drop status messages whose condition has passed
pub fn refresh_status<G: Gateway>(controller: &Controller<G>, ui: &mut UiState) {
    if ui.status.is(LESSON_LOADING) && !controller.session().lesson.is_loading() {
        ui.status.clear();
    }
}

fn switch_mode<G: Gateway>(controller: &mut Controller<G>, ui: &mut UiState, mode: AppMode) {
    controller.set_mode(mode);
    ui.status.clear();
    if mode == AppMode::Chat {
        ui.focus = Focus::Main;
        ui.chat_scroll.to_bottom();
    }
}

fn move_in<G: Gateway>(
    controller: &mut Controller<G>,
    ui: &mut UiState,
    context: KeyContext,
    action: Action,
) {
    match context {
        KeyContext::Sidebar => {
            let page = ui.sidebar_height.max(1);
            let steps = match action {
                Action::Up | Action::Down => 1,
                Action::PageUp | Action::PageDown => page,
                _ => usize::MAX,
            };
            let rows = controller.navigation().visible_items(controller.curriculum()).len();
            for _ in 0..steps.min(rows) {
                match action {
                    Action::Up | Action::PageUp | Action::Top => controller.cursor_up(),
                    _ => controller.cursor_down(),
                }
            }
        }
        KeyContext::Learn | KeyContext::Chat => {
            let scroll =
                if context == KeyContext::Learn { &mut ui.lesson_scroll } else { &mut ui.chat_scroll };
            match action {
                Action::Up => scroll.scroll_up(1),
                Action::Down => scroll.scroll_down(1),
                Action::PageUp => scroll.scroll_up(scroll.page()),
                Action::PageDown => scroll.scroll_down(scroll.page()),
                Action::Top => scroll.to_top(),
                _ => scroll.to_bottom(),
            }
        }
        KeyContext::Quiz => {
            if controller.session().quiz.is_answered() {
                return;
            }
            match action {
                Action::Up => ui.quiz_cursor = ui.quiz_cursor.saturating_sub(1),
                Action::Down => ui.quiz_cursor = (ui.quiz_cursor + 1).min(OPTION_COUNT - 1),
                _ => {}
            }
        }
    }
}

/// Enter in the quiz: answer, then advance, then start over
fn activate_quiz<G: Gateway>(controller: &mut Controller<G>, ui: &mut UiState) {
    let quiz = &controller.session().quiz;
    match quiz.status() {
        QuizStatus::Completed => {
            controller.restart_quiz();
            ui.quiz_cursor = 0;
        }
        QuizStatus::Ready if quiz.has_no_questions() => {
            controller.restart_quiz();
        }
        QuizStatus::Ready if quiz.is_answered() => {
            if controller.advance_quiz() {
                ui.quiz_cursor = 0;
            }
        }
        QuizStatus::Ready => {
            controller.select_option(ui.quiz_cursor);
        }
        QuizStatus::NotLoaded | QuizStatus::Loading => {}
    }
}

fn edit_chat<G: Gateway>(controller: &mut Controller<G>, ui: &mut UiState, action: Action) {
    // Input is locked while a reply is outstanding.
    if controller.session().chat.is_sending() {
        return;
    }

    match action {
        Action::Insert(c) => ui.input.insert_char(c),
        Action::Backspace => ui.input.backspace(),
        Action::Delete => ui.input.delete(),
        Action::CursorLeft => ui.input.move_left(),
        Action::CursorRight => ui.input.move_right(),
        Action::CursorStart => ui.input.move_start(),
        Action::CursorEnd => ui.input.move_end(),
        Action::Send => {
            if controller.send_message(ui.input.text()) {
                ui.input.clear();
                ui.chat_scroll.to_bottom();
            }
        }
        _ => {}
    }
}
