//! Buffer mutations.
//!
//! Every mutation builds a full [`Edit`] and goes through [`CodeEditor::commit`],
//! which normalizes tabs, moves the cursor and notifies listeners.

use crate::protocol::{self, Edit};

use super::CodeEditor;

impl CodeEditor {
    /// Number of characters in the buffer.
    pub(crate) fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte index of the character at `offset`, clamped to the buffer.
    pub(crate) fn byte_index(&self, offset: usize) -> usize {
        self.content
            .char_indices()
            .nth(offset)
            .map_or(self.content.len(), |(idx, _)| idx)
    }

    /// Returns the selected text, `None` when the selection is collapsed.
    pub(crate) fn selected_text(&self) -> Option<String> {
        let selection = self.selection();
        if selection.is_collapsed() {
            return None;
        }

        let start = self.byte_index(selection.start);
        let end = self.byte_index(selection.end);
        Some(self.content[start..end].to_owned())
    }

    /// Replaces the selection (or inserts at the cursor) with `insertion`.
    pub(crate) fn replace_selection(&mut self, insertion: &str) {
        let selection = self.selection();
        let start = self.byte_index(selection.start);
        let end = self.byte_index(selection.end);

        let mut text = String::with_capacity(
            self.content.len() - (end - start) + insertion.len(),
        );
        text.push_str(&self.content[..start]);
        text.push_str(insertion);
        text.push_str(&self.content[end..]);

        let cursor = selection.start + insertion.chars().count();
        self.commit(Edit { text, cursor });
    }

    /// Deletes the selection, or the character before the cursor.
    pub(crate) fn delete_backward(&mut self) {
        if self.selection().is_collapsed() {
            if self.head == 0 {
                return;
            }
            self.anchor = self.head - 1;
        }
        self.replace_selection("");
    }

    /// Deletes the selection, or the character after the cursor.
    pub(crate) fn delete_forward(&mut self) {
        if self.selection().is_collapsed() {
            if self.head >= self.char_count() {
                return;
            }
            self.anchor = self.head + 1;
        }
        self.replace_selection("");
    }

    /// Commits `edit` as the new buffer state.
    ///
    /// The first tab of the new text is turned into spaces and the cursor is
    /// collapsed at the edit's cursor. The change listener only hears about
    /// edits that actually changed the text.
    pub(crate) fn commit(&mut self, edit: Edit) {
        let Edit { text, cursor } = protocol::normalize_tabs(edit);
        let changed = text != self.content;

        self.content = text;
        let cursor = cursor.min(self.char_count());
        self.anchor = cursor;
        self.head = cursor;

        self.refresh_highlighting();
        self.reset_cursor_blink();

        if changed {
            tracing::debug!(len = self.content.len(), cursor, "committed edit");
            self.notify_change();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::highlighter::Language;
    use crate::protocol::Selection;
    use pretty_assertions::assert_eq;

    fn editor_at(content: &str, anchor: usize, head: usize) -> CodeEditor {
        let mut editor = CodeEditor::new(content, Language::JavaScript);
        editor.anchor = anchor;
        editor.head = head;
        editor
    }

    #[test]
    fn test_replace_collapsed_selection_inserts() {
        let mut editor = editor_at("hello", 5, 5);
        editor.replace_selection(" world");
        assert_eq!(editor.content(), "hello world");
        assert_eq!(editor.selection(), Selection::collapsed(11));
    }

    #[test]
    fn test_replace_selection_backwards() {
        let mut editor = editor_at("hello world", 11, 6);
        editor.replace_selection("there");
        assert_eq!(editor.content(), "hello there");
        assert_eq!(editor.selection(), Selection::collapsed(11));
    }

    #[test]
    fn test_replace_selection_with_multibyte_text() {
        let mut editor = editor_at("你好世界", 1, 3);
        editor.replace_selection("-");
        assert_eq!(editor.content(), "你-界");
        assert_eq!(editor.selection(), Selection::collapsed(2));
    }

    #[test]
    fn test_selected_text() {
        assert_eq!(editor_at("hello", 1, 4).selected_text().as_deref(), Some("ell"));
        assert_eq!(editor_at("hello", 4, 1).selected_text().as_deref(), Some("ell"));
        assert_eq!(editor_at("hello", 2, 2).selected_text(), None);
    }

    #[test]
    fn test_delete_backward() {
        let mut editor = editor_at("abc", 2, 2);
        editor.delete_backward();
        assert_eq!(editor.content(), "ac");
        assert_eq!(editor.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut editor = editor_at("abc", 0, 0);
        editor.delete_backward();
        assert_eq!(editor.content(), "abc");
    }

    #[test]
    fn test_delete_forward() {
        let mut editor = editor_at("abc", 1, 1);
        editor.delete_forward();
        assert_eq!(editor.content(), "ac");
        assert_eq!(editor.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut editor = editor_at("abc", 3, 3);
        editor.delete_forward();
        assert_eq!(editor.content(), "abc");
    }

    #[test]
    fn test_delete_removes_selection() {
        let mut editor = editor_at("hello world", 0, 6);
        editor.delete_forward();
        assert_eq!(editor.content(), "world");
        assert_eq!(editor.selection(), Selection::collapsed(0));
    }

    #[test]
    fn test_commit_normalizes_tab() {
        let mut editor = editor_at("foo", 0, 0);
        editor.replace_selection("\t");
        assert_eq!(editor.content(), "  foo");
        assert_eq!(editor.selection(), Selection::collapsed(2));
    }

    #[test]
    fn test_commit_clamps_cursor() {
        let mut editor = editor_at("", 0, 0);
        editor.commit(Edit::new("ab", 10));
        assert_eq!(editor.selection(), Selection::collapsed(2));
    }

    #[test]
    fn test_commit_notifies_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut editor = CodeEditor::new("ab", Language::JavaScript)
            .on_change(move |text| sink.borrow_mut().push(text.to_owned()));

        editor.commit(Edit::new("ab", 1));
        editor.commit(Edit::new("abc", 3));

        assert_eq!(*seen.borrow(), vec!["abc".to_owned()]);
    }
}
