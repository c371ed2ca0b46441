//! Atlassian Document Format (ADF) for issue descriptions.
//!
//! Jira Cloud's v3 API rejects plain strings in rich-text fields, so
//! description cells are wrapped in the smallest valid document: one
//! paragraph per input line, one text node per paragraph.

use serde::{Deserialize, Serialize};

/// ADF version emitted for every document.
pub const ADF_VERSION: u32 = 1;

/// Top-level document node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Always [`DocumentKind::Doc`].
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub version: u32,
    pub content: Vec<Block>,
}

/// Tag of the root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Doc,
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph { content: Vec<Inline> },
}

/// Inline nodes inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Text { text: String },
}

impl Document {
    /// Convert plain text into a document.
    ///
    /// Lines end at `\n`, `\r\n`, a lone `\r`, or any of the other
    /// Unicode line boundaries (vertical tab, form feed, the file/group/
    /// record separators, NEL, U+2028, U+2029). A trailing terminator does
    /// not open an extra line. Empty input yields a single empty
    /// paragraph.
    pub fn from_plain_text(text: &str) -> Self {
        let mut lines = split_lines(text);
        if lines.is_empty() {
            lines.push("");
        }

        let content = lines
            .into_iter()
            .map(|line| Block::Paragraph {
                content: vec![Inline::Text {
                    text: line.to_string(),
                }],
            })
            .collect();

        Self {
            kind: DocumentKind::Doc,
            version: ADF_VERSION,
            content,
        }
    }

    /// Number of paragraphs in the document.
    pub fn paragraph_count(&self) -> usize {
        self.content.len()
    }
}

/// Characters that end a line. `\r\n` is handled as a single terminator.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(LINE_BREAKS) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let tail = &rest[idx..];
                let skip = if tail.starts_with("\r\n") {
                    2
                } else {
                    tail.chars().next().map_or(1, char::len_utf8)
                };
                rest = &tail[skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}
