//! A code input widget for Iced.
//!
//! This crate provides a canvas-based code input with syntax highlighting
//! and the small editing conveniences people expect when typing code:
//!
//! - **Auto-indentation**: Enter indents the new line like the nearest
//!   non-blank line above, one step deeper after `{`, `(`, `[`, `<` or `:`
//! - **Brace auto-closing**: typing an opening brace or quote inserts its
//!   closing counterpart and leaves the cursor in between
//! - **Tab normalization**: tabs become two spaces
//! - **Syntax highlighting** through `syntect`
//! - **Line numbers**, read-only mode and change/key listeners
//!
//! The editing rules live in plain functions ([`braces`], [`indentation`],
//! [`strings`], [`protocol`]) that know nothing about the UI.
//!
//! # Example
//!
//! ```no_run
//! use iced::widget::container;
//! use iced::{Element, Task};
//! use iced_code_input::{CodeEditor, Language, Message as EditorMessage};
//!
//! struct MyApp {
//!     editor: CodeEditor,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     EditorEvent(EditorMessage),
//! }
//!
//! impl Default for MyApp {
//!     fn default() -> Self {
//!         let code = "const greet = (name) => {\n  return `hi ${name}`;\n};";
//!
//!         Self {
//!             editor: CodeEditor::new(code, Language::JavaScript)
//!                 .with_line_numbers(true)
//!                 .on_change(|text| tracing::debug!(len = text.len(), "changed")),
//!         }
//!     }
//! }
//!
//! impl MyApp {
//!     fn update(&mut self, message: Message) -> Task<Message> {
//!         match message {
//!             Message::EditorEvent(event) => {
//!                 self.editor.update(&event).map(Message::EditorEvent)
//!             }
//!         }
//!     }
//!
//!     fn view(&self) -> Element<'_, Message> {
//!         container(self.editor.view().map(Message::EditorEvent))
//!             .padding(20)
//!             .into()
//!     }
//! }
//!
//! fn main() -> iced::Result {
//!     iced::run(MyApp::update, MyApp::view)
//! }
//! ```
//!
//! # Themes
//!
//! ```no_run
//! use iced_code_input::{CodeEditor, Language, SyntaxStyle, theme};
//!
//! let mut editor = CodeEditor::new("fn main() {}", Language::Rust)
//!     .with_syntax_style(SyntaxStyle::InspiredGitHub);
//!
//! editor.set_theme(theme::from_iced_theme(&iced::Theme::Light));
//! ```
//!
//! # Keyboard Shortcuts
//!
//! | Shortcut | Action |
//! |----------|--------|
//! | **Arrow Keys** | Move cursor |
//! | **Shift + Arrows** | Move cursor with selection |
//! | **Home** / **End** | Jump to start/end of line |
//! | **Backspace** / **Delete** | Delete selection or one character |
//! | **Enter** | New line, auto-indented |
//! | **Tab** | Insert two spaces |
//! | **Ctrl + C** or **Ctrl + Insert** | Copy selected text |
//! | **Ctrl + V** or **Shift + Insert** | Paste from clipboard |

pub mod braces;
mod code_editor;
mod error;
pub mod highlighter;
pub mod indentation;
pub mod protocol;
pub mod strings;
pub mod theme;

pub use code_editor::{ArrowDirection, CodeEditor, Message};
pub use error::{Error, Result};
pub use highlighter::{Highlighter, Language, SyntaxStyle, Token};
pub use theme::{Style, dark, from_iced_theme, light};
