//! Sidebar navigation and topic selection

use std::collections::HashSet;

use crate::curriculum::{Curriculum, Topic};

/// A row in the flattened sidebar tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeItem<'a> {
    Category(&'a Topic),
    Lesson(&'a Topic),
}

impl<'a> TreeItem<'a> {
    pub fn topic(&self) -> &'a Topic {
        match self {
            Self::Category(t) | Self::Lesson(t) => t,
        }
    }
}

/// Expanded categories, selected lesson and sidebar cursor
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Category ids currently expanded
    expanded: HashSet<String>,
    /// Id of the selected lesson
    selected: String,
    /// Cursor row in the visible tree
    cursor: usize,
    /// First visible row
    scroll_offset: usize,
    /// Rows that fit in the sidebar (updated on render)
    visible_height: usize,
    /// Terminal too narrow for a docked sidebar
    narrow: bool,
    /// Overlay sidebar shown (narrow layout only)
    sidebar_open: bool,
}

impl NavigationState {
    /// Select the first lesson of the first category and expand that category
    pub fn new(curriculum: &Curriculum) -> Option<Self> {
        let (category, leaf) = curriculum.first_leaf()?;
        let mut state = Self {
            expanded: HashSet::from([category.id.clone()]),
            selected: leaf.id.clone(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 0,
            narrow: false,
            sidebar_open: false,
        };
        state.cursor = state.row_of(curriculum, &leaf.id).unwrap_or(0);
        Some(state)
    }

    pub fn selected_id(&self) -> &str {
        &self.selected
    }

    pub fn is_expanded(&self, category_id: &str) -> bool {
        self.expanded.contains(category_id)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Flip a category between expanded and collapsed
    pub fn toggle_category(&mut self, category_id: &str) {
        if !self.expanded.remove(category_id) {
            self.expanded.insert(category_id.to_string());
        }
    }

    /// Select a lesson. Category nodes are rejected.
    pub fn select_topic(&mut self, topic: &Topic) -> bool {
        if !topic.is_leaf() {
            return false;
        }
        self.selected = topic.id.clone();
        if self.narrow {
            self.sidebar_open = false;
        }
        true
    }

    /// Rows currently shown in the sidebar
    pub fn visible_items<'a>(&self, curriculum: &'a Curriculum) -> Vec<TreeItem<'a>> {
        let mut items = Vec::new();
        for category in &curriculum.categories {
            if category.is_leaf() {
                items.push(TreeItem::Lesson(category));
                continue;
            }
            items.push(TreeItem::Category(category));
            if self.is_expanded(&category.id) {
                items.extend(category.children.iter().map(TreeItem::Lesson));
            }
        }
        items
    }

    /// Row under the cursor
    pub fn item_under_cursor<'a>(&self, curriculum: &'a Curriculum) -> Option<TreeItem<'a>> {
        self.visible_items(curriculum).get(self.cursor).copied()
    }

    fn row_of(&self, curriculum: &Curriculum, id: &str) -> Option<usize> {
        self.visible_items(curriculum).iter().position(|item| item.topic().id == id)
    }

    pub fn move_down(&mut self, curriculum: &Curriculum) {
        let len = self.visible_items(curriculum).len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
        self.ensure_cursor_visible();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.ensure_cursor_visible();
    }

    /// Keep the cursor on a real row after the tree shrinks
    pub fn clamp_cursor(&mut self, curriculum: &Curriculum) {
        let len = self.visible_items(curriculum).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.ensure_cursor_visible();
    }

    /// Record the sidebar height from the last render
    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        self.ensure_cursor_visible();
    }

    /// Ensure the cursor row is visible by adjusting scroll offset
    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }
        if self.visible_height > 0 && self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor + 1 - self.visible_height;
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    /// Switch between docked and overlay sidebar
    pub fn set_narrow(&mut self, narrow: bool) {
        if narrow != self.narrow {
            self.narrow = narrow;
            self.sidebar_open = false;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Whether the sidebar occupies the screen
    pub fn sidebar_visible(&self) -> bool {
        !self.narrow || self.sidebar_open
    }
}
