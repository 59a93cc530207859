//! Paragraph splitting.
//!
//! A paragraph break is any run of newlines, each optionally followed by
//! horizontal whitespace or carriage returns.

use regex::Regex;
use std::sync::LazyLock;

/// One or more newlines, each optionally trailed by `\r`, `\t` or spaces.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\n[\r\t ]*)+").expect("valid regex"));

/// Split text into trimmed, non-empty paragraphs in document order.
pub fn paragraphs(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_separates() {
        assert_eq!(paragraphs("Ok.\n\nTest."), vec!["Ok.", "Test."]);
    }

    #[test]
    fn whitespace_inside_line_break() {
        assert_eq!(paragraphs("Ok.\n    \nTest."), vec!["Ok.", "Test."]);
    }

    #[test]
    fn more_than_two_line_breaks() {
        assert_eq!(paragraphs("Ok.\n\n\nTest."), vec!["Ok.", "Test."]);
    }

    #[test]
    fn trailing_newlines_ignored() {
        let text = "Ok.\n  \n\nTest.\n  \r\n  \n\n";
        assert_eq!(paragraphs(text), vec!["Ok.", "Test."]);
    }

    #[test]
    fn single_newline_is_a_break() {
        assert_eq!(paragraphs("one\ntwo"), vec!["one", "two"]);
    }

    #[test]
    fn leading_indentation_trimmed() {
        let text = "    First line.\n\n    Second line.\n";
        assert_eq!(paragraphs(text), vec!["First line.", "Second line."]);
    }

    #[test]
    fn empty_input() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs(" \n\t\n ").is_empty());
    }
}
