//! Presentation of parsed comparison documents.
//!
//! Diff sections are rendered row by row. A row is a classified line plus two
//! cases that never reach the line classifier's markers: blank spacers and
//! code-fence markers.

mod html;
mod json;
mod terminal;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;

use crate::markdown::{LineKind, Section, classify_line};
use error_set::error_set;
use pulldown_cmark::Options;
use serde::Serialize;

error_set! {
    /// Errors from rendering a comparison
    RenderError := {
        #[display("Failed to encode comparison as JSON: {message}")]
        JsonEncode { message: String },
    }
}

/// Turns parsed sections into output text
pub trait Renderer {
    fn render(&self, sections: &[Section]) -> Result<String, RenderError>;
}

/// Presentation role of one diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Whitespace-only line, shown as a spacer
    Blank,
    /// A ```` ``` ```` code fence marker, shown verbatim
    Fence,
    Removed,
    Added,
    Heading,
    Normal,
}

impl RowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Blank => "blank",
            RowKind::Fence => "fence",
            RowKind::Removed => "removed",
            RowKind::Added => "added",
            RowKind::Heading => "heading",
            RowKind::Normal => "normal",
        }
    }
}

/// A diff line ready for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffRow<'a> {
    #[serde(rename = "type")]
    pub kind: RowKind,
    pub content: &'a str,
}

impl<'a> DiffRow<'a> {
    /// Classify a diff line for presentation.
    ///
    /// Blank lines are caught before classification. Fence markers are only
    /// recognized once the line is known not to be a removal or addition.
    pub fn from_line(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self {
                kind: RowKind::Blank,
                content: "",
            };
        }

        let parsed = classify_line(line);
        let kind = match parsed.kind {
            LineKind::Removed => RowKind::Removed,
            LineKind::Added => RowKind::Added,
            _ if trimmed.starts_with("```") => RowKind::Fence,
            LineKind::Heading => RowKind::Heading,
            LineKind::Normal => RowKind::Normal,
        };

        Self {
            kind,
            content: parsed.content,
        }
    }
}

/// Rows for every line of a diff section's content
pub fn diff_rows(content: &str) -> impl Iterator<Item = DiffRow<'_>> {
    content.split('\n').map(DiffRow::from_line)
}

/// Markdown extensions used for commentary and inline line content
fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}
