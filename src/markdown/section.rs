use super::trim_blank;
use serde::Serialize;

/// Sentinel the comparison backend places between diff and understanding text.
///
/// Matched exactly and case-sensitively.
pub const DELIMITER: &str = "$#69#$";

/// Role of a section within a comparison document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Line-oriented diff text
    Diff,
    /// Natural-language commentary about the surrounding diff
    Understanding,
}

impl SectionKind {
    /// Kind for the part at `index` of the raw split, before blank parts are dropped.
    fn from_split_index(index: usize) -> Self {
        if index % 2 == 1 {
            SectionKind::Understanding
        } else {
            SectionKind::Diff
        }
    }
}

/// A contiguous chunk of a comparison document between two delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Trimmed text of the chunk (never empty)
    pub content: String,
}

impl Section {
    pub fn is_diff(&self) -> bool {
        self.kind == SectionKind::Diff
    }

    /// Newline-separated lines of the section content
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

/// Split a comparison document into diff and understanding sections.
///
/// Parts are typed by their position in the raw split: even positions are
/// diffs, odd positions are understanding. Blank parts are dropped *after*
/// typing, so a dropped part does not shift the kind of the parts after it.
///
/// # Examples
///
/// ```
/// use eula_diff::markdown::{split_into_sections, SectionKind, DELIMITER};
///
/// let doc = format!("-old\n+new{DELIMITER}Why it changed{DELIMITER}");
/// let sections = split_into_sections(&doc);
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].kind, SectionKind::Diff);
/// assert_eq!(sections[1].kind, SectionKind::Understanding);
/// assert_eq!(sections[1].content, "Why it changed");
/// ```
pub fn split_into_sections(document: &str) -> Vec<Section> {
    let sections: Vec<Section> = document
        .split(DELIMITER)
        .enumerate()
        .filter_map(|(index, part)| {
            let kind = SectionKind::from_split_index(index);
            let content = trim_blank(part);
            (!content.is_empty()).then(|| Section {
                kind,
                content: content.to_string(),
            })
        })
        .collect();

    log::debug!(
        "split {} bytes into {} sections",
        document.len(),
        sections.len()
    );
    sections
}
