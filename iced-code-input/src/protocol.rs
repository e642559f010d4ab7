//! Edit decisions taken after a keystroke has been inserted.
//!
//! The host inserts every key natively first. Two keys then get a follow-up
//! rewrite of the whole buffer:
//!
//! - **Enter** indents the new line like the nearest non-blank line above it,
//!   one step deeper when that line opens a block. When the newline splits a
//!   fresh brace pair (`{|}`), the closing brace is moved to its own line as
//!   well.
//! - **An open brace or quote** gets its closing counterpart inserted right
//!   after it, with the cursor left in between.
//!
//! Every other key is only forwarded to listeners. All decisions are local to
//! the cursor: no brace depth is tracked across the buffer.
//!
//! # Example
//!
//! ```
//! use iced_code_input::protocol::{FollowUp, KeyEvent, Selection};
//!
//! // The host already inserted the newline; the cursor is after it.
//! let text = "const func = () => {\n}";
//! let key = KeyEvent::from_key("Enter");
//!
//! let edit = key
//!     .follow_up()
//!     .map(|follow_up| follow_up.apply(text, Selection::collapsed(21)));
//!
//! let edit = edit.unwrap_or_default();
//! assert_eq!(edit.text, "const func = () => {\n  \n}");
//! assert_eq!(edit.cursor, 23);
//! ```

use std::borrow::Cow;

use crate::braces;
use crate::indentation::{self, INDENT_SIZE};
use crate::strings;

/// A selection in character offsets.
///
/// `start == end` is a collapsed cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Creates a selection spanning `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed selection at `offset`.
    #[must_use]
    pub const fn collapsed(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    /// Returns whether the selection is a plain cursor.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The result of an edit: the full new text and the new cursor offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Edit {
    pub text: String,
    pub cursor: usize,
}

impl Edit {
    #[must_use]
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self { text: text.into(), cursor }
    }
}

/// A key press as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// The Enter key.
    Enter,
    /// An opening brace or quote, see [`braces::BRACES`].
    OpenBrace(char),
    /// Anything else, by its raw key name.
    Other(String),
}

impl KeyEvent {
    /// Classifies a raw key name such as `"Enter"`, `"("` or `"a"`.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        if key == "Enter" {
            return Self::Enter;
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if braces::is_open_brace(ch, false) => {
                Self::OpenBrace(ch)
            }
            _ => Self::Other(key.to_owned()),
        }
    }

    /// Returns the raw key name, as forwarded to key listeners.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Enter => Cow::Borrowed("Enter"),
            Self::OpenBrace(ch) => Cow::Owned(ch.to_string()),
            Self::Other(key) => Cow::Borrowed(key),
        }
    }

    /// Returns the rewrite to run once the key itself has been inserted.
    #[must_use]
    pub fn follow_up(&self) -> Option<FollowUp> {
        match self {
            Self::Enter => Some(FollowUp::Indent),
            Self::OpenBrace(ch) => Some(FollowUp::CloseBrace(*ch)),
            Self::Other(_) => None,
        }
    }
}

/// A rewrite scheduled after the native insertion of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Indent the line just created by Enter.
    Indent,
    /// Close the brace just typed.
    CloseBrace(char),
}

impl FollowUp {
    /// Applies the rewrite to the committed text and selection.
    #[must_use]
    pub fn apply(self, text: &str, selection: Selection) -> Edit {
        match self {
            Self::Indent => indent_after_newline(text, selection),
            Self::CloseBrace(open) => {
                close_after_open_brace(text, selection, open)
            }
        }
    }
}

/// Indents the line created by a newline that sits right before
/// `selection.start`.
///
/// The cursor lands at the end of the inserted indentation. When the newline
/// split a brace pair, the closing character gets its own line, indented one
/// step less for regular braces and at the same depth for quotes.
#[must_use]
pub fn indent_after_newline(text: &str, selection: Selection) -> Edit {
    let cursor_position = to_signed(selection.start) - 1;

    let preceding = &text[..strings::byte_offset(text, cursor_position)];
    let lines: Vec<&str> = preceding.split('\n').collect();
    let indent_size = indentation::suggested_indent_size(&lines);
    let mut indent = indentation::create_indent_string(indent_size);

    let left = strings::char_at(text, cursor_position - 1);
    let right = strings::char_at(text, cursor_position + 1);
    if braces::is_brace_pair(left, right) {
        let closing_indent_size = if left.is_some_and(braces::is_regular_brace)
        {
            indent_size.saturating_sub(INDENT_SIZE)
        } else {
            indent_size
        };
        indent.push('\n');
        indent.push_str(&indentation::create_indent_string(closing_indent_size));
        tracing::trace!(indent_size, closing_indent_size, "splitting brace pair");
    }

    let text = strings::insert_string_at(text, cursor_position, &indent);
    let cursor = to_unsigned(cursor_position + 1 + to_signed(indent_size));

    Edit { text, cursor }
}

/// Inserts the closing counterpart of `open`, which sits right before
/// `selection.start`, and leaves the cursor between the two.
///
/// Text that does not start with a recognised open brace is returned as is.
#[must_use]
pub fn close_after_open_brace(
    text: &str,
    selection: Selection,
    open: char,
) -> Edit {
    let Some(close) = braces::close_brace(open) else {
        return Edit::new(text, selection.start);
    };

    let cursor_position = to_signed(selection.start) - 1;
    let mut buf = [0; 4];
    let text =
        strings::insert_string_at(text, cursor_position, close.encode_utf8(&mut buf));

    Edit { text, cursor: selection.start }
}

/// Normalizes the first tab of a committed edit into spaces.
///
/// The cursor keeps its place relative to the surrounding text.
#[must_use]
pub fn normalize_tabs(edit: Edit) -> Edit {
    let Some(tab) = edit.text.chars().position(|ch| ch == '\t') else {
        return edit;
    };

    let cursor = if tab < edit.cursor {
        edit.cursor + INDENT_SIZE - 1
    } else {
        edit.cursor
    };

    Edit { text: strings::convert_tabs_to_spaces(&edit.text), cursor }
}

fn to_signed(offset: usize) -> isize {
    isize::try_from(offset).unwrap_or(isize::MAX)
}

fn to_unsigned(offset: isize) -> usize {
    usize::try_from(offset).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Simulates the host: inserts `key` at the cursor, then runs the
    /// follow-up of the key, if any.
    fn type_key(text: &str, cursor: usize, key: &str) -> Edit {
        let inserted = if key == "Enter" { "\n" } else { key };
        let typed = strings::insert_string_at(
            text,
            to_signed(cursor) - 1,
            inserted,
        );
        let cursor = cursor + inserted.chars().count();

        match KeyEvent::from_key(key).follow_up() {
            Some(follow_up) => {
                normalize_tabs(follow_up.apply(&typed, Selection::collapsed(cursor)))
            }
            None => normalize_tabs(Edit::new(typed, cursor)),
        }
    }

    #[test]
    fn test_key_classification() {
        assert_eq!(KeyEvent::from_key("Enter"), KeyEvent::Enter);
        assert_eq!(KeyEvent::from_key("{"), KeyEvent::OpenBrace('{'));
        assert_eq!(KeyEvent::from_key("'"), KeyEvent::OpenBrace('\''));
        assert_eq!(KeyEvent::from_key("}"), KeyEvent::Other("}".to_owned()));
        assert_eq!(
            KeyEvent::from_key("Backspace"),
            KeyEvent::Other("Backspace".to_owned())
        );
        assert_eq!(KeyEvent::from_key(""), KeyEvent::Other(String::new()));
    }

    #[test]
    fn test_key_names_round_trip_through_classification() {
        for key in ["Enter", "(", "`", "x", "Tab"] {
            assert_eq!(KeyEvent::from_key(key).name(), key);
        }
    }

    #[test]
    fn test_follow_ups() {
        assert_eq!(KeyEvent::Enter.follow_up(), Some(FollowUp::Indent));
        assert_eq!(
            KeyEvent::OpenBrace('[').follow_up(),
            Some(FollowUp::CloseBrace('['))
        );
        assert_eq!(KeyEvent::Other("a".to_owned()).follow_up(), None);
    }

    #[test]
    fn test_enter_splits_brace_pair() {
        let edit = type_key("const func = () => {}", 20, "Enter");
        assert_eq!(edit.text, "const func = () => {\n  \n}");
        assert_eq!(edit.cursor, 23);
    }

    #[test]
    fn test_enter_splits_nested_brace_pair() {
        let text = "fn main() {\n  let v = vec![]";
        let edit = type_key(text, text.len() - 1, "Enter");
        assert_eq!(edit.text, "fn main() {\n  let v = vec![\n    \n  ]");
        assert_eq!(edit.cursor, "fn main() {\n  let v = vec![\n    ".len());
    }

    #[test]
    fn test_enter_splits_quote_pair_at_same_depth() {
        let text = "  x = \"\"";
        let edit = type_key(text, 7, "Enter");
        assert_eq!(edit.text, "  x = \"\n  \n  \"");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn test_enter_keeps_indentation() {
        let edit = type_key("  foo();", 8, "Enter");
        assert_eq!(edit.text, "  foo();\n  ");
        assert_eq!(edit.cursor, 11);
    }

    #[test]
    fn test_enter_after_python_colon() {
        let edit = type_key("def main():", 11, "Enter");
        assert_eq!(edit.text, "def main():\n  ");
        assert_eq!(edit.cursor, 14);
    }

    #[test]
    fn test_enter_skips_blank_lines() {
        let edit = type_key("if x:\n\n", 7, "Enter");
        assert_eq!(edit.text, "if x:\n\n\n  ");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn test_enter_on_empty_buffer() {
        let edit = type_key("", 0, "Enter");
        assert_eq!(edit.text, "\n");
        assert_eq!(edit.cursor, 1);
    }

    #[test]
    fn test_open_brace_on_empty_buffer() {
        let edit = type_key("", 0, "(");
        assert_eq!(edit.text, "()");
        assert_eq!(edit.cursor, 1);
    }

    #[test]
    fn test_open_quote_in_middle_of_text() {
        let edit = type_key("print()", 6, "'");
        assert_eq!(edit.text, "print('')");
        assert_eq!(edit.cursor, 7);
    }

    #[test]
    fn test_other_key_is_not_rewritten() {
        let edit = type_key("ab", 1, "x");
        assert_eq!(edit, Edit::new("axb", 2));
    }

    #[test]
    fn test_close_after_unknown_brace_is_noop() {
        let edit = close_after_open_brace("a}", Selection::collapsed(2), '}');
        assert_eq!(edit, Edit::new("a}", 2));
    }

    #[test]
    fn test_normalize_tabs_moves_cursor_past_tab() {
        let edit = normalize_tabs(Edit::new("\tfoo", 1));
        assert_eq!(edit, Edit::new("  foo", 2));
    }

    #[test]
    fn test_normalize_tabs_keeps_cursor_before_tab() {
        let edit = normalize_tabs(Edit::new("foo\t", 1));
        assert_eq!(edit, Edit::new("foo  ", 1));
    }

    #[test]
    fn test_normalize_tabs_without_tab() {
        let edit = normalize_tabs(Edit::new("foo", 3));
        assert_eq!(edit, Edit::new("foo", 3));
    }
}
