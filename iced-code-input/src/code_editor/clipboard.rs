//! Clipboard operations (copy, paste).

use iced::Task;

use super::{CodeEditor, Message};

impl CodeEditor {
    /// Copies selected text to clipboard.
    pub(crate) fn copy_selection(&self) -> Task<Message> {
        if let Some(text) = self.selected_text() {
            iced::clipboard::write(text)
        } else {
            Task::none()
        }
    }

    /// Pastes text at the cursor, replacing the selection.
    ///
    /// An empty `text` reads the system clipboard first and pastes its
    /// content through a follow-up [`Message::Paste`].
    pub(crate) fn paste_text(&mut self, text: &str) -> Task<Message> {
        if text.is_empty() {
            return iced::clipboard::read().and_then(|clipboard_text| {
                Task::done(Message::Paste(clipboard_text))
            });
        }

        self.replace_selection(text);
        self.scroll_to_cursor()
    }
}
