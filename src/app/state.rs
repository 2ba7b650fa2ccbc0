//! Presentation state kept alongside the controller

/// Which side of the screen receives keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    #[default]
    Main,
}

/// Scroll position of a rendered panel
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Lines from top
    pub offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
    /// Stick to the last line as content grows
    pub follow: bool,
}

impl ScrollState {
    /// Scroll state pinned to the bottom
    pub fn following() -> Self {
        Self { follow: true, ..Self::default() }
    }

    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    /// Record the geometry from the last render
    pub fn update(&mut self, total_lines: usize, visible_height: usize) {
        self.total_lines = total_lines;
        self.visible_height = visible_height;
        if self.follow {
            self.offset = self.max_scroll();
        }
        self.offset = self.offset.min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_scroll());
        self.follow = self.offset >= self.max_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
        self.follow = false;
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
        self.follow = false;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_scroll();
        self.follow = true;
    }

    pub fn page(&self) -> usize {
        self.visible_height.saturating_sub(2).max(1)
    }
}

/// Single-line text input; the cursor is a character index
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map_or(self.text.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

/// Message shown in the bottom line
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn is(&self, msg: &str) -> bool {
        self.message.as_deref() == Some(msg)
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Everything the renderer needs beyond the domain state
#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub lesson_scroll: ScrollState,
    pub chat_scroll: ScrollState,
    pub input: InputLine,
    pub status: StatusLine,
    /// Highlighted quiz option before it is picked
    pub quiz_cursor: usize,
    pub show_help: bool,
    /// Sidebar rows from the last render
    pub sidebar_height: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::default(),
            lesson_scroll: ScrollState::default(),
            chat_scroll: ScrollState::following(),
            input: InputLine::default(),
            status: StatusLine::default(),
            quiz_cursor: 0,
            show_help: false,
            sidebar_height: 0,
        }
    }
}

impl UiState {
    /// Forget per-topic presentation after another topic is selected
    pub fn reset_for_topic(&mut self) {
        self.lesson_scroll = ScrollState::default();
        self.chat_scroll = ScrollState::following();
        self.input.clear();
        self.quiz_cursor = 0;
    }
}
