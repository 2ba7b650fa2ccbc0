//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::AppMode;

/// Where keys are routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Sidebar,
    Learn,
    Chat,
    Quiz,
}

impl KeyContext {
    pub fn for_mode(mode: AppMode) -> Self {
        match mode {
            AppMode::Learn => Self::Learn,
            AppMode::Chat => Self::Chat,
            AppMode::Quiz => Self::Quiz,
        }
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    Activate,

    // Layout
    FocusSidebar,
    FocusMain,
    ToggleSidebar,

    // Modes
    NextMode,
    PrevMode,
    SetMode(AppMode),

    // Learn
    ReloadLesson,

    // Chat input
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    Send,

    // Quiz
    PickOption(usize),
    NextQuestion,
    RestartQuiz,

    Help,
    Quit,
}

/// Map a key press to an action for the given context
pub fn map_key(key: KeyEvent, context: KeyContext) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') | KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('u') | KeyCode::Char('b') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => return Some(Action::NextMode),
        KeyCode::BackTab => return Some(Action::PrevMode),
        KeyCode::PageDown => return Some(Action::PageDown),
        KeyCode::PageUp => return Some(Action::PageUp),
        _ => {}
    }

    match context {
        KeyContext::Chat => chat_key(key.code),
        KeyContext::Sidebar => sidebar_key(key.code).or_else(|| common_key(key.code)),
        KeyContext::Learn => learn_key(key.code).or_else(|| common_key(key.code)),
        KeyContext::Quiz => quiz_key(key.code).or_else(|| common_key(key.code)),
    }
}

/// Keys shared by every context except chat, where they are text
fn common_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('1') => Some(Action::SetMode(AppMode::Learn)),
        KeyCode::Char('2') => Some(Action::SetMode(AppMode::Chat)),
        KeyCode::Char('3') => Some(Action::SetMode(AppMode::Quiz)),
        KeyCode::Char('[') => Some(Action::ToggleSidebar),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn sidebar_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Esc => Some(Action::FocusMain),
        _ => None,
    }
}

fn learn_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Char('d') => Some(Action::PageDown),
        KeyCode::Char('u') => Some(Action::PageUp),
        KeyCode::Char('r') => Some(Action::ReloadLesson),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Esc => Some(Action::FocusSidebar),
        _ => None,
    }
}

fn quiz_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('a') | KeyCode::Char('أ') => Some(Action::PickOption(0)),
        KeyCode::Char('b') | KeyCode::Char('ب') => Some(Action::PickOption(1)),
        KeyCode::Char('c') | KeyCode::Char('ج') => Some(Action::PickOption(2)),
        KeyCode::Char('d') | KeyCode::Char('د') => Some(Action::PickOption(3)),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char('n') => Some(Action::NextQuestion),
        KeyCode::Char('r') => Some(Action::RestartQuiz),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Esc => Some(Action::FocusSidebar),
        _ => None,
    }
}

/// In chat every printable key is text
fn chat_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(c) => Some(Action::Insert(c)),
        KeyCode::Enter => Some(Action::Send),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Esc => Some(Action::FocusSidebar),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_cycles_modes_everywhere() {
        for context in [KeyContext::Sidebar, KeyContext::Learn, KeyContext::Chat, KeyContext::Quiz] {
            assert_eq!(map_key(press(KeyCode::Tab), context), Some(Action::NextMode));
            assert_eq!(map_key(press(KeyCode::BackTab), context), Some(Action::PrevMode));
        }
    }

    #[test]
    fn digits_switch_modes_outside_chat() {
        assert_eq!(
            map_key(press(KeyCode::Char('3')), KeyContext::Learn),
            Some(Action::SetMode(AppMode::Quiz))
        );
        assert_eq!(map_key(press(KeyCode::Char('3')), KeyContext::Chat), Some(Action::Insert('3')));
    }

    #[test]
    fn q_quits_except_while_typing() {
        assert_eq!(map_key(press(KeyCode::Char('q')), KeyContext::Sidebar), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q')), KeyContext::Chat), Some(Action::Insert('q')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, KeyContext::Chat), Some(Action::Quit));
    }

    #[test]
    fn quiz_letters_pick_options() {
        assert_eq!(map_key(press(KeyCode::Char('a')), KeyContext::Quiz), Some(Action::PickOption(0)));
        assert_eq!(map_key(press(KeyCode::Char('د')), KeyContext::Quiz), Some(Action::PickOption(3)));
        assert_eq!(map_key(press(KeyCode::Char('d')), KeyContext::Learn), Some(Action::PageDown));
    }

    #[test]
    fn arabic_text_goes_into_chat() {
        assert_eq!(map_key(press(KeyCode::Char('ق')), KeyContext::Chat), Some(Action::Insert('ق')));
        assert_eq!(map_key(press(KeyCode::Enter), KeyContext::Chat), Some(Action::Send));
    }

    #[test]
    fn escape_moves_focus() {
        assert_eq!(map_key(press(KeyCode::Esc), KeyContext::Learn), Some(Action::FocusSidebar));
        assert_eq!(map_key(press(KeyCode::Esc), KeyContext::Sidebar), Some(Action::FocusMain));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(map_key(press(KeyCode::Char('x')), KeyContext::Learn), None);
    }
}
