//! Position-based string helpers.
//!
//! Positions are character offsets, not byte offsets, so that they line up
//! with the cursor offsets of the editor.

use crate::indentation;

/// Replaces the first tab in `s` with one indentation step.
///
/// Only a single tab is replaced per call: the editor runs this on every
/// committed change, and a keystroke introduces at most one tab.
///
/// # Examples
///
/// ```
/// use iced_code_input::strings::convert_tabs_to_spaces;
///
/// assert_eq!(convert_tabs_to_spaces("\thello"), "  hello");
/// assert_eq!(convert_tabs_to_spaces("\t\thello"), "  \thello");
/// ```
#[must_use]
pub fn convert_tabs_to_spaces(s: &str) -> String {
    s.replacen('\t', &indentation::default_indent_string(), 1)
}

/// Inserts `insertion` right after the character at `position`.
///
/// A negative position prepends. A position at or past the last character
/// appends.
///
/// # Examples
///
/// ```
/// use iced_code_input::strings::insert_string_at;
///
/// assert_eq!(insert_string_at("world", -1, "hello"), "helloworld");
/// assert_eq!(insert_string_at("how  you", 3, "are"), "how are you");
/// ```
#[must_use]
pub fn insert_string_at(s: &str, position: isize, insertion: &str) -> String {
    let split = byte_offset(s, position.saturating_add(1));
    let (head, tail) = s.split_at(split);

    let mut result = String::with_capacity(s.len() + insertion.len());
    result.push_str(head);
    result.push_str(insertion);
    result.push_str(tail);
    result
}

/// Converts a character offset into a byte offset, clamped to `s`.
pub(crate) fn byte_offset(s: &str, char_offset: isize) -> usize {
    let Ok(char_offset) = usize::try_from(char_offset) else {
        return 0;
    };
    s.char_indices().nth(char_offset).map_or(s.len(), |(idx, _)| idx)
}

/// Returns the character at `char_offset`, or `None` when out of bounds.
pub(crate) fn char_at(s: &str, char_offset: isize) -> Option<char> {
    usize::try_from(char_offset)
        .ok()
        .and_then(|offset| s.chars().nth(offset))
}
