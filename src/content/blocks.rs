//! Line-oriented parser for generated lesson text
//!
//! The model is asked for light Markdown (headings, bold, bullets). Each input
//! line becomes exactly one block; the first matching rule wins and anything
//! unrecognized degrades to a paragraph with inline bold spans.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bold marker used by the lesson generator
const BOLD_MARKER: &str = "**";

/// Non-greedy bold span within a line (compiled once)
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// A run of text inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
}

impl InlineSpan {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) => text,
        }
    }
}

/// One renderable line of lesson content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// `## ` or `### ` heading
    Heading { level: u8, text: String },
    /// A line wrapped entirely in bold markers
    BoldLine { text: String },
    /// A `- ` or `* ` bullet; bullets are never grouped into lists
    BulletItem { text: String },
    /// Free text split into plain and bold runs
    Paragraph { spans: Vec<InlineSpan> },
    /// Empty or whitespace-only line
    BlankLine,
}

/// Parse lesson text into blocks, one per line
pub fn parse_blocks(text: &str) -> Vec<ContentBlock> {
    text.lines().map(parse_line).collect()
}

/// Classify a single line
pub fn parse_line(line: &str) -> ContentBlock {
    if let Some(rest) = line.strip_prefix("### ") {
        return ContentBlock::Heading { level: 3, text: rest.to_string() };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return ContentBlock::Heading { level: 2, text: rest.to_string() };
    }
    if is_bold_line(line) {
        return ContentBlock::BoldLine { text: line.replace(BOLD_MARKER, "") };
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return ContentBlock::BulletItem { text: rest.to_string() };
    }
    if line.trim().is_empty() {
        return ContentBlock::BlankLine;
    }
    ContentBlock::Paragraph { spans: split_bold(line) }
}

/// Markers may overlap, so `**` and `***` count as bold lines too
fn is_bold_line(line: &str) -> bool {
    line.starts_with(BOLD_MARKER) && line.ends_with(BOLD_MARKER)
}

/// Split a line at every `**...**` run. Unpaired markers stay in plain text.
fn split_bold(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(InlineSpan::Plain(line[last..whole.start()].to_string()));
        }
        spans.push(InlineSpan::Bold(inner.as_str().to_string()));
        last = whole.end();
    }

    if last < line.len() {
        spans.push(InlineSpan::Plain(line[last..].to_string()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn plain(s: &str) -> InlineSpan {
        InlineSpan::Plain(s.to_string())
    }

    fn bold(s: &str) -> InlineSpan {
        InlineSpan::Bold(s.to_string())
    }

    #[test]
    fn parse_mixed_lesson() {
        let blocks = parse_blocks("## Title\n- item one\n\nplain **bold** text");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Heading { level: 2, text: "Title".into() },
                ContentBlock::BulletItem { text: "item one".into() },
                ContentBlock::BlankLine,
                ContentBlock::Paragraph { spans: vec![plain("plain "), bold("bold"), plain(" text")] },
            ]
        );
    }

    #[test]
    fn parse_level_three_heading_first() {
        assert_eq!(parse_line("### القياس"), ContentBlock::Heading {
            level: 3,
            text: "القياس".into()
        });
    }

    #[test]
    fn heading_needs_trailing_space() {
        assert!(matches!(parse_line("##Title"), ContentBlock::Paragraph { .. }));
    }

    #[test]
    fn parse_bold_line() {
        assert_eq!(parse_line("**مقدمة**"), ContentBlock::BoldLine { text: "مقدمة".into() });
    }

    #[test]
    fn bold_line_strips_every_marker() {
        assert_eq!(parse_line("**a** and **b**"), ContentBlock::BoldLine { text: "a and b".into() });
    }

    #[test]
    fn short_marker_lines_are_bold_lines() {
        assert_eq!(parse_line("**"), ContentBlock::BoldLine { text: String::new() });
        assert_eq!(parse_line("***"), ContentBlock::BoldLine { text: "*".into() });
    }

    #[test]
    fn parse_star_bullet() {
        assert_eq!(parse_line("* الإجماع"), ContentBlock::BulletItem { text: "الإجماع".into() });
    }

    #[test]
    fn bold_bullet_is_bullet_not_bold_line() {
        // Starts with "* " but also "**"; the bold-line rule requires both ends.
        assert_eq!(parse_line("* **term**: meaning"), ContentBlock::BulletItem {
            text: "**term**: meaning".into()
        });
    }

    #[test]
    fn whitespace_line_is_blank() {
        assert_eq!(parse_line("   \t"), ContentBlock::BlankLine);
    }

    #[test]
    fn unpaired_marker_stays_plain() {
        assert_eq!(parse_line("a **b"), ContentBlock::Paragraph { spans: vec![plain("a **b")] });
    }

    #[test]
    fn paragraph_starting_with_bold() {
        assert_eq!(parse_line("**الحكم** الشرعي"), ContentBlock::Paragraph {
            spans: vec![bold("الحكم"), plain(" الشرعي")]
        });
    }

    #[test]
    fn crlf_lines() {
        assert_eq!(parse_blocks("## A\r\nb\r\n"), vec![
            ContentBlock::Heading { level: 2, text: "A".into() },
            ContentBlock::Paragraph { spans: vec![plain("b")] },
        ]);
    }

    #[test]
    fn empty_text_has_no_blocks() {
        assert!(parse_blocks("").is_empty());
    }

    #[test]
    fn blocks_serialize_tagged() {
        let json = serde_json::to_string(&ContentBlock::BulletItem { text: "x".into() }).unwrap();
        assert_eq!(json, r#"{"type":"bullet_item","text":"x"}"#);
    }

    proptest! {
        #[test]
        fn one_block_per_line(text in "[ a-z*#\\-\n]{0,80}") {
            prop_assert_eq!(parse_blocks(&text).len(), text.lines().count());
        }

        #[test]
        fn paragraph_spans_rebuild_the_line(line in "[a-z *]{1,40}") {
            if let ContentBlock::Paragraph { spans } = parse_line(&line) {
                let rebuilt: String = spans
                    .iter()
                    .map(|s| match s {
                        InlineSpan::Plain(t) => t.clone(),
                        InlineSpan::Bold(t) => format!("**{t}**"),
                    })
                    .collect();
                prop_assert_eq!(rebuilt, line);
            }
        }
    }
}
