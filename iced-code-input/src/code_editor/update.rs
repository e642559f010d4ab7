//! Message handling and update logic.

use iced::Task;

use crate::protocol::KeyEvent;

use super::{CURSOR_BLINK_INTERVAL, CodeEditor, Message};

impl CodeEditor {
    /// Updates the editor state based on messages and returns follow-up
    /// tasks.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to process
    ///
    /// # Returns
    ///
    /// A Task that may scroll the cursor into view, access the clipboard,
    /// or post the [`Message::FollowUp`] of the key just typed
    pub fn update(&mut self, message: &Message) -> Task<Message> {
        match message {
            Message::CharacterInput(ch) => {
                let key = KeyEvent::from_key(ch.encode_utf8(&mut [0; 4]));
                self.type_key(&key, |editor| {
                    editor.replace_selection(ch.encode_utf8(&mut [0; 4]));
                })
            }
            Message::Enter => self.type_key(&KeyEvent::Enter, |editor| {
                editor.replace_selection("\n");
            }),
            Message::Tab => self.type_key(&KeyEvent::from_key("Tab"), |editor| {
                editor.replace_selection("\t");
            }),
            Message::Backspace => self
                .type_key(&KeyEvent::from_key("Backspace"), Self::delete_backward),
            Message::Delete => {
                self.type_key(&KeyEvent::from_key("Delete"), Self::delete_forward)
            }
            Message::FollowUp(follow_up) => {
                if self.read_only {
                    return Task::none();
                }

                let edit = follow_up.apply(&self.content, self.selection());
                tracing::trace!(?follow_up, cursor = edit.cursor, "follow-up");
                self.commit(edit);
                self.scroll_to_cursor()
            }
            Message::ArrowKey(direction, shift_pressed) => {
                self.move_cursor(*direction, *shift_pressed);
                self.scroll_to_cursor()
            }
            Message::Home(shift_pressed) => {
                self.move_to_line_start(*shift_pressed);
                Task::none()
            }
            Message::End(shift_pressed) => {
                self.move_to_line_end(*shift_pressed);
                Task::none()
            }
            Message::MouseClick(point) => {
                // Gain focus when clicked
                self.has_focus = true;
                self.handle_mouse_click(*point);
                Task::none()
            }
            Message::Blur => {
                self.has_focus = false;
                self.cursor_visible = false;
                self.cache.clear();
                Task::none()
            }
            Message::Copy => self.copy_selection(),
            Message::Paste(text) => {
                if self.read_only {
                    return Task::none();
                }
                self.paste_text(text)
            }
            Message::Tick => {
                // Handle cursor blinking only if editor has focus
                if self.has_focus
                    && self.last_blink.elapsed() >= CURSOR_BLINK_INTERVAL
                {
                    self.cursor_visible = !self.cursor_visible;
                    self.last_blink = web_time::Instant::now();
                    self.cache.clear();
                }
                Task::none()
            }
            Message::Scrolled(viewport) => {
                self.viewport_scroll = viewport.absolute_offset().y;
                let new_height = viewport.bounds().height;
                // Clear cache when the viewport is resized
                if (self.viewport_height - new_height).abs() > 1.0 {
                    self.cache.clear();
                }
                self.viewport_height = new_height;
                Task::none()
            }
        }
    }

    /// Runs a key press: notifies the key listener, performs the native edit
    /// and schedules the key's follow-up rewrite.
    ///
    /// Read-only editors drop the key entirely.
    fn type_key(
        &mut self,
        key: &KeyEvent,
        native_edit: impl FnOnce(&mut Self),
    ) -> Task<Message> {
        if self.read_only || !self.has_focus {
            return Task::none();
        }

        self.notify_key_press(&key.name());
        native_edit(self);

        let scroll = self.scroll_to_cursor();
        match key.follow_up() {
            Some(follow_up) => {
                Task::batch([scroll, Task::done(Message::FollowUp(follow_up))])
            }
            None => scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::code_editor::ArrowDirection;
    use crate::highlighter::Language;
    use crate::protocol::{FollowUp, Selection};
    use pretty_assertions::assert_eq;

    /// Sends `message` and, like the event loop would, the follow-up it
    /// schedules.
    fn press(editor: &mut CodeEditor, message: &Message) {
        let follow_up = match message {
            Message::Enter => Some(FollowUp::Indent),
            Message::CharacterInput(ch) => {
                KeyEvent::from_key(&ch.to_string()).follow_up()
            }
            _ => None,
        };

        let _ = editor.update(message);
        if let Some(follow_up) = follow_up {
            let _ = editor.update(&Message::FollowUp(follow_up));
        }
    }

    fn type_text(editor: &mut CodeEditor, text: &str) {
        for ch in text.chars() {
            let message = if ch == '\n' {
                Message::Enter
            } else {
                Message::CharacterInput(ch)
            };
            press(editor, &message);
        }
    }

    fn editor_at(content: &str, cursor: usize) -> CodeEditor {
        let mut editor = CodeEditor::new(content, Language::JavaScript);
        editor.set_head(cursor, false);
        editor
    }

    #[test]
    fn test_enter_between_braces() {
        let mut editor = editor_at("const func = () => {}", 20);
        press(&mut editor, &Message::Enter);
        assert_eq!(editor.content(), "const func = () => {\n  \n}");
        assert_eq!(editor.selection(), Selection::collapsed(23));
    }

    #[test]
    fn test_open_brace_in_empty_editor() {
        let mut editor = editor_at("", 0);
        press(&mut editor, &Message::CharacterInput('('));
        assert_eq!(editor.content(), "()");
        assert_eq!(editor.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_typing_a_function() {
        let mut editor = editor_at("if (x) ", 7);
        type_text(&mut editor, "{\nreturn;");
        assert_eq!(editor.content(), "if (x) {\n  return;\n}");
        assert_eq!(editor.selection(), Selection::collapsed(18));
    }

    #[test]
    fn test_typing_with_selection() {
        let mut editor = editor_at("hello world", 0);
        editor.set_head(5, true);
        press(&mut editor, &Message::CharacterInput('X'));
        assert_eq!(editor.content(), "X world");
        assert_eq!(editor.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_open_brace_replaces_selection() {
        let mut editor = editor_at("a b", 0);
        editor.set_head(1, true);
        press(&mut editor, &Message::CharacterInput('['));
        assert_eq!(editor.content(), "[] b");
        assert_eq!(editor.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_tab_inserts_indent() {
        let mut editor = editor_at("foo", 0);
        press(&mut editor, &Message::Tab);
        assert_eq!(editor.content(), "  foo");
        assert_eq!(editor.selection(), Selection::collapsed(2));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut editor = editor_at("abcd", 2);
        press(&mut editor, &Message::Backspace);
        assert_eq!(editor.content(), "acd");
        press(&mut editor, &Message::Delete);
        assert_eq!(editor.content(), "ad");
        assert_eq!(editor.selection(), Selection::collapsed(1));
    }

    #[test]
    fn test_home_key() {
        let mut editor = editor_at("one\ntwo", 6);
        let _ = editor.update(&Message::Home(false));
        assert_eq!(editor.selection(), Selection::collapsed(4));
    }

    #[test]
    fn test_end_key() {
        let mut editor = editor_at("one\ntwo", 4);
        let _ = editor.update(&Message::End(true));
        assert_eq!(editor.selection(), Selection::new(4, 7));
    }

    #[test]
    fn test_arrow_key_with_shift_creates_selection() {
        let mut editor = editor_at("hello", 0);
        let _ = editor.update(&Message::ArrowKey(ArrowDirection::Right, true));
        assert_eq!(editor.selection(), Selection::new(0, 1));
    }

    #[test]
    fn test_arrow_key_without_shift_clears_selection() {
        let mut editor = editor_at("hello", 0);
        editor.set_head(3, true);
        let _ = editor.update(&Message::ArrowKey(ArrowDirection::Down, false));
        assert_eq!(editor.selection(), Selection::collapsed(5));
    }

    #[test]
    fn test_change_listener_receives_text() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut editor = CodeEditor::new("", Language::JavaScript)
            .on_change(move |text| sink.borrow_mut().push(text.to_owned()));

        press(&mut editor, &Message::CharacterInput('{'));

        assert_eq!(*seen.borrow(), vec!["{".to_owned(), "{}".to_owned()]);
    }

    #[test]
    fn test_key_listener_receives_key_names() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut editor = CodeEditor::new("", Language::JavaScript)
            .on_key_press(move |key| sink.borrow_mut().push(key.to_owned()));

        press(&mut editor, &Message::CharacterInput('a'));
        press(&mut editor, &Message::Enter);
        press(&mut editor, &Message::Tab);
        press(&mut editor, &Message::Backspace);
        press(&mut editor, &Message::CharacterInput('('));

        assert_eq!(*seen.borrow(), ["a", "Enter", "Tab", "Backspace", "("]);
    }

    #[test]
    fn test_read_only_ignores_edits() {
        let changes = Rc::new(RefCell::new(0));
        let keys = Rc::new(RefCell::new(0));
        let change_sink = Rc::clone(&changes);
        let key_sink = Rc::clone(&keys);
        let mut editor = CodeEditor::new("let x;", Language::JavaScript)
            .with_read_only(true)
            .on_change(move |_| *change_sink.borrow_mut() += 1)
            .on_key_press(move |_| *key_sink.borrow_mut() += 1);

        type_text(&mut editor, "(\n");
        press(&mut editor, &Message::Backspace);
        press(&mut editor, &Message::Paste("pasted".to_owned()));

        assert_eq!(editor.content(), "let x;");
        assert_eq!(*changes.borrow(), 0);
        assert_eq!(*keys.borrow(), 0);
    }

    #[test]
    fn test_read_only_still_navigates() {
        let mut editor = editor_at("abc", 0).with_read_only(true);
        let _ = editor.update(&Message::ArrowKey(ArrowDirection::Right, true));
        assert_eq!(editor.selection(), Selection::new(0, 1));
    }

    #[test]
    fn test_unfocused_editor_ignores_keys_until_clicked() {
        let mut editor = editor_at("", 0).with_auto_focus(false);
        press(&mut editor, &Message::CharacterInput('a'));
        assert_eq!(editor.content(), "");

        let _ = editor.update(&Message::MouseClick(iced::Point::ORIGIN));
        assert!(editor.is_focused());
        press(&mut editor, &Message::CharacterInput('a'));
        assert_eq!(editor.content(), "a");
    }

    #[test]
    fn test_blur_drops_focus() {
        let mut editor = editor_at("", 0);
        let _ = editor.update(&Message::Blur);
        assert!(!editor.is_focused());
        assert!(!editor.cursor_visible);
    }

    #[test]
    fn test_paste_message() {
        let mut editor = editor_at("ab", 1);
        let _ = editor.update(&Message::Paste("\tx".to_owned()));
        assert_eq!(editor.content(), "a  xb");
        assert_eq!(editor.selection(), Selection::collapsed(4));
    }
}
