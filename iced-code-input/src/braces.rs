//! Brace and quote classification.
//!
//! The tables here drive both auto-closing (typing an open brace inserts its
//! close) and auto-indentation (a line ending in a regular brace opens a
//! block).
//!
//! Quote characters map to themselves, so they are at the same time open and
//! close braces. Only the "regular" braces `{`, `(`, `[` and `<` count as
//! block openers.

/// Open brace to close brace mapping.
pub const BRACES: &[(char, char)] = &[
    ('{', '}'),
    ('(', ')'),
    ('[', ']'),
    ('<', '>'),
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
];

/// Braces that open a block. Quotes are excluded.
pub const REGULAR_BRACES: &[char] = &['{', '(', '[', '<'];

/// Checks whether `ch` is an opening brace.
///
/// With `only_regular` set, quote characters are rejected and only `{`, `(`,
/// `[` or `<` match.
///
/// # Examples
///
/// ```
/// use iced_code_input::braces::is_open_brace;
///
/// assert!(is_open_brace('"', false));
/// assert!(!is_open_brace('"', true));
/// assert!(is_open_brace('{', true));
/// ```
#[must_use]
pub fn is_open_brace(ch: char, only_regular: bool) -> bool {
    if only_regular && !is_regular_brace(ch) {
        return false;
    }
    BRACES.iter().any(|&(open, _)| open == ch)
}

/// Checks whether `ch` is a closing brace.
#[must_use]
pub fn is_close_brace(ch: char) -> bool {
    BRACES.iter().any(|&(_, close)| close == ch)
}

/// Returns the closing brace for an opening brace, or `None` when `ch` is not
/// an opening brace.
///
/// # Examples
///
/// ```
/// use iced_code_input::braces::close_brace;
///
/// assert_eq!(close_brace('['), Some(']'));
/// assert_eq!(close_brace(']'), None);
/// ```
#[must_use]
pub fn close_brace(ch: char) -> Option<char> {
    BRACES
        .iter()
        .find_map(|&(open, close)| (open == ch).then_some(close))
}

/// Checks whether two characters form a brace pair.
///
/// Either side may be missing (the cursor sits at a buffer boundary), in
/// which case there is no pair.
#[must_use]
pub fn is_brace_pair(open: Option<char>, close: Option<char>) -> bool {
    match (open, close) {
        (Some(open), Some(close)) => {
            is_open_brace(open, false) && close_brace(open) == Some(close)
        }
        _ => false,
    }
}

/// Checks whether `ch` is one of `{`, `(`, `[` or `<`.
#[must_use]
pub fn is_regular_brace(ch: char) -> bool {
    REGULAR_BRACES.contains(&ch)
}
