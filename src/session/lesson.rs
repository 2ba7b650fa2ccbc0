//! Generated lesson for the selected topic

use crate::content::{ContentBlock, parse_blocks};

/// Where the lesson text stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LessonState {
    /// Not requested for this topic yet
    #[default]
    NotRequested,
    /// Request outstanding
    Loading,
    /// Text received and parsed
    Ready { text: String, blocks: Vec<ContentBlock> },
    /// The generator returned nothing usable
    Unavailable,
}

impl LessonState {
    /// Whether entering Learn mode should request the lesson
    pub fn needs_load(&self) -> bool {
        matches!(self, Self::NotRequested | Self::Unavailable)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Mark a request as outstanding; false if one already is
    pub fn begin_loading(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = Self::Loading;
        true
    }

    /// Receive generated text. Blank text means the lesson is unavailable.
    pub fn load(&mut self, text: String) {
        if !self.is_loading() {
            tracing::warn!("lesson text arrived outside loading");
            return;
        }
        *self = if text.trim().is_empty() {
            Self::Unavailable
        } else {
            let blocks = parse_blocks(&text);
            Self::Ready { text, blocks }
        };
    }

    /// Parsed blocks, if ready
    pub fn blocks(&self) -> Option<&[ContentBlock]> {
        match self {
            Self::Ready { blocks, .. } => Some(blocks),
            _ => None,
        }
    }
}
