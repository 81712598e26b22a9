//! Parsing of comparison documents.
//!
//! A comparison document is diff text interleaved with "understanding"
//! commentary, separated by [`DELIMITER`]:
//!
//! ```text
//! - old clause
//! + new clause
//! $#69#$
//! The clause now allows data sharing with partners.
//! $#69#$
//! - another removed clause
//! ```
//!
//! [`split_into_sections`] cuts the document into [`Section`]s and
//! [`classify_line`] assigns each line of a diff section a [`LineKind`].

mod line;
mod section;

pub use line::{LineKind, ParsedLine, classify_line};
pub use section::{DELIMITER, Section, SectionKind, split_into_sections};

/// Trim blank characters from both ends of payload text.
///
/// Blank means Unicode whitespace plus a stray byte-order mark (`U+FEFF`),
/// but not `U+0085` (next line), which comparison payloads keep as content.
pub(crate) fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c: char| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn trims_whitespace_and_byte_order_mark() {
        assert_eq!(trim_blank("\u{feff} \t-old\r\n\u{a0}"), "-old");
        assert_eq!(trim_blank("\u{2028}+new\u{3000}\u{feff}"), "+new");
        assert_eq!(trim_blank(" \u{feff} \n"), "");
    }

    #[test]
    fn next_line_character_is_kept() {
        assert_eq!(trim_blank("\u{85}note\u{85} "), "\u{85}note\u{85}");
    }
}
