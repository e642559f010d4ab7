//! Indentation inference for freshly inserted lines.
//!
//! The suggested indentation of a new line is the surface indentation of the
//! nearest non-blank line above it, plus one step when that line ends by
//! opening a block (a regular brace, or a colon for Python-style blocks).
//! Nothing here parses the language or counts brace depth across the buffer.

use crate::braces;

/// Width of one indentation step. Kept small for narrow screens.
pub const INDENT_SIZE: usize = 2;

/// Character used for indentation.
pub const INDENT_SYMBOL: char = ' ';

/// Returns the indentation size of a single line.
///
/// Blank lines have no indentation. For other lines this is the number of
/// leading [`INDENT_SYMBOL`]s, plus [`INDENT_SIZE`] when the last
/// non-whitespace character is a regular open brace or `:`.
///
/// # Examples
///
/// ```
/// use iced_code_input::indentation::indent_size;
///
/// assert_eq!(indent_size("const func = () => {"), 2);
/// assert_eq!(indent_size("    return x;"), 4);
/// assert_eq!(indent_size("def main():"), 2);
/// ```
#[must_use]
pub fn indent_size(line: &str) -> usize {
    let Some(leading) = line.chars().position(|ch| ch != INDENT_SYMBOL) else {
        return 0;
    };

    let opens_block = line
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|last| braces::is_open_brace(last, true) || last == ':');

    if opens_block {
        leading + INDENT_SIZE
    } else {
        leading
    }
}

/// Returns the indentation size suggested for a line following `lines`.
///
/// Lines are scanned from the last one backwards; the first line with
/// non-whitespace content decides. Returns 0 when every line is blank.
#[must_use]
pub fn suggested_indent_size<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .rev()
        .map(AsRef::as_ref)
        .find(|line| !line.trim().is_empty())
        .map_or(0, indent_size)
}

/// Creates an indentation string of `size` indent symbols.
#[must_use]
pub fn create_indent_string(size: usize) -> String {
    std::iter::repeat_n(INDENT_SYMBOL, size).collect()
}

/// Creates an indentation string of one [`INDENT_SIZE`] step.
#[must_use]
pub fn default_indent_string() -> String {
    create_indent_string(INDENT_SIZE)
}
