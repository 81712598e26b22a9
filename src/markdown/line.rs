use nom::{
    IResult, Parser,
    character::complete::{char, satisfy},
    combinator::peek,
    sequence::terminated,
};
use serde::Serialize;

/// Role of a single diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Removed,
    Added,
    Heading,
    Normal,
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Removed => "removed",
            LineKind::Added => "added",
            LineKind::Heading => "heading",
            LineKind::Normal => "normal",
        }
    }
}

/// A classified diff line.
///
/// `content` has the `-`/`+` marker stripped for removed and added lines and
/// is the untouched line otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedLine<'a> {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub content: &'a str,
}

impl<'a> ParsedLine<'a> {
    fn new(kind: LineKind, content: &'a str) -> Self {
        Self { kind, content }
    }
}

/// Classify one line of a diff section.
///
/// Rules are tried in order and the first match wins:
/// 1. `-` followed by a character other than `-` is a removal
/// 2. `+` followed by a character other than `+` is an addition
/// 3. a leading `#` is a heading
/// 4. anything else is normal text
///
/// A lone `-` or `+`, and runs such as `--` or `++`, are not markers.
///
/// # Examples
///
/// ```
/// use eula_diff::markdown::{classify_line, LineKind};
///
/// let line = classify_line("-x");
/// assert_eq!(line.kind, LineKind::Removed);
/// assert_eq!(line.content, "x");
///
/// assert_eq!(classify_line("--").kind, LineKind::Normal);
/// assert_eq!(classify_line("#nospace").kind, LineKind::Heading);
/// ```
pub fn classify_line(line: &str) -> ParsedLine<'_> {
    if let Some(content) = strip_marker(line, '-') {
        ParsedLine::new(LineKind::Removed, content)
    } else if let Some(content) = strip_marker(line, '+') {
        ParsedLine::new(LineKind::Added, content)
    } else if line.starts_with('#') {
        ParsedLine::new(LineKind::Heading, line)
    } else {
        ParsedLine::new(LineKind::Normal, line)
    }
}

/// Strip a single `symbol` when it is followed by some other character
fn strip_marker(line: &str, symbol: char) -> Option<&str> {
    let result: IResult<&str, char> =
        terminated(char(symbol), peek(satisfy(|c| c != symbol))).parse(line);
    result.ok().map(|(rest, _)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn parsed(kind: LineKind, content: &str) -> ParsedLine<'_> {
        ParsedLine { kind, content }
    }

    #[test]
    fn removed_line() {
        assert_eq!(classify_line("-x"), parsed(LineKind::Removed, "x"));
        assert_eq!(
            classify_line("- old line"),
            parsed(LineKind::Removed, " old line")
        );
    }

    #[test]
    fn added_line() {
        assert_eq!(
            classify_line("+added text"),
            parsed(LineKind::Added, "added text")
        );
        assert_eq!(
            classify_line("+ new line"),
            parsed(LineKind::Added, " new line")
        );
    }

    #[test]
    fn lone_markers_are_normal() {
        assert_eq!(classify_line("-"), parsed(LineKind::Normal, "-"));
        assert_eq!(classify_line("+"), parsed(LineKind::Normal, "+"));
    }

    #[test]
    fn doubled_markers_are_normal() {
        assert_eq!(classify_line("--"), parsed(LineKind::Normal, "--"));
        assert_eq!(classify_line("---"), parsed(LineKind::Normal, "---"));
        assert_eq!(classify_line("++x"), parsed(LineKind::Normal, "++x"));
    }

    #[test]
    fn mixed_markers_strip_first() {
        assert_eq!(classify_line("-+"), parsed(LineKind::Removed, "+"));
        assert_eq!(classify_line("+-"), parsed(LineKind::Added, "-"));
    }

    #[test]
    fn marker_before_heading() {
        assert_eq!(
            classify_line("-# Old title"),
            parsed(LineKind::Removed, "# Old title")
        );
    }

    #[test]
    fn heading_lines() {
        assert_eq!(
            classify_line("## Heading"),
            parsed(LineKind::Heading, "## Heading")
        );
        assert_eq!(
            classify_line("#nospace"),
            parsed(LineKind::Heading, "#nospace")
        );
    }

    #[test]
    fn indented_heading_is_normal() {
        assert_eq!(
            classify_line("  # not a heading"),
            parsed(LineKind::Normal, "  # not a heading")
        );
    }

    #[test]
    fn normal_lines() {
        assert_eq!(
            classify_line("plain text"),
            parsed(LineKind::Normal, "plain text")
        );
        assert_eq!(classify_line(""), parsed(LineKind::Normal, ""));
        assert_eq!(classify_line(" - indented"), parsed(LineKind::Normal, " - indented"));
    }

    #[test]
    fn marker_followed_by_carriage_return() {
        assert_eq!(classify_line("-\r"), parsed(LineKind::Removed, "\r"));
    }

    #[test]
    fn multibyte_content() {
        assert_eq!(classify_line("-é"), parsed(LineKind::Removed, "é"));
        assert_eq!(classify_line("+—"), parsed(LineKind::Added, "—"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Marker lines lose exactly their first character; others are untouched
        #[test]
        fn content_is_suffix_of_line(line in "\\PC{0,16}") {
            let parsed = classify_line(&line);
            match parsed.kind {
                LineKind::Removed | LineKind::Added => {
                    prop_assert_eq!(parsed.content, &line[1..]);
                }
                LineKind::Heading | LineKind::Normal => {
                    prop_assert_eq!(parsed.content, line.as_str());
                }
            }
        }

        /// Classification depends only on the first two characters
        #[test]
        fn kind_depends_on_prefix(prefix in "[-+# a]{0,2}", tail in "[a-z ]{0,8}") {
            let line = format!("{prefix}{tail}");
            let expected = match prefix.as_bytes() {
                [b'-', second, ..] if *second != b'-' => LineKind::Removed,
                [b'-'] if tail.starts_with(|c: char| c != '-') => LineKind::Removed,
                [b'+', second, ..] if *second != b'+' => LineKind::Added,
                [b'+'] if tail.starts_with(|c: char| c != '+') => LineKind::Added,
                [b'#', ..] => LineKind::Heading,
                [] if tail.starts_with('#') => LineKind::Heading,
                _ => LineKind::Normal,
            };
            prop_assert_eq!(classify_line(&line).kind, expected);
        }
    }
}
