//! Lesson text to renderable blocks

pub mod blocks;

pub use blocks::{ContentBlock, InlineSpan, parse_blocks};
