//! Canvas-based code input widget.
//!
//! The widget owns a single flat text buffer and one selection. Keys are
//! inserted natively first; Enter and opening braces then schedule a
//! [`FollowUp`] on the same event loop, which rewrites the committed buffer
//! through the [`protocol`](crate::protocol) module.

use iced::widget::{Id, canvas};
use unicode_width::UnicodeWidthChar;
use web_time::Instant;

use crate::highlighter::{Highlighter, Language, SyntaxStyle, Token};
use crate::protocol::{FollowUp, Selection};
use crate::theme::Style;

mod canvas_impl;
mod clipboard;
mod cursor;
mod editing;
mod update;
mod view;

/// Canvas-based code input constants
pub(crate) const FONT_SIZE: f32 = 14.0;
pub(crate) const LINE_HEIGHT: f32 = 20.0;
pub(crate) const CHAR_WIDTH: f32 = 8.4; // Monospace character width
pub(crate) const GUTTER_WIDTH: f32 = 45.0;
pub(crate) const TEXT_PADDING: f32 = 5.0;
pub(crate) const CURSOR_BLINK_INTERVAL: std::time::Duration =
    std::time::Duration::from_millis(530);

type Listener = Box<dyn Fn(&str)>;

/// Code input widget with auto-indentation and brace auto-closing.
pub struct CodeEditor {
    /// Text buffer
    pub(crate) content: String,
    /// Selection anchor (character offset)
    pub(crate) anchor: usize,
    /// Selection head, where the cursor is drawn (character offset)
    pub(crate) head: usize,
    /// Syntax highlighter
    pub(crate) highlighter: Highlighter,
    /// Highlighted lines of `content`
    pub(crate) highlighted: Vec<Vec<Token>>,
    /// Editor theme style
    pub(crate) style: Style,
    /// Font size in pixels
    pub(crate) font_size: f32,
    /// Line height in pixels
    pub(crate) line_height: f32,
    /// Width of a narrow character in pixels
    pub(crate) char_width: f32,
    /// Whether the line number gutter is drawn
    pub(crate) line_numbers_enabled: bool,
    /// Whether edits are rejected
    pub(crate) read_only: bool,
    /// Whether keyboard events are handled
    pub(crate) has_focus: bool,
    /// Last cursor blink time
    pub(crate) last_blink: Instant,
    /// Cursor visible state
    pub(crate) cursor_visible: bool,
    /// Cache for canvas rendering
    pub(crate) cache: canvas::Cache,
    /// Scrollable ID for programmatic scrolling
    pub(crate) scrollable_id: Id,
    /// Current viewport scroll position (Y offset)
    pub(crate) viewport_scroll: f32,
    /// Viewport height (visible area)
    pub(crate) viewport_height: f32,
    on_change: Option<Listener>,
    on_key_press: Option<Listener>,
}

/// Messages emitted by the code editor
#[derive(Debug, Clone)]
pub enum Message {
    /// Character typed
    CharacterInput(char),
    /// Enter pressed
    Enter,
    /// Tab pressed (inserts a tab, normalized to spaces on commit)
    Tab,
    /// Backspace pressed
    Backspace,
    /// Delete pressed
    Delete,
    /// Arrow key pressed (direction, shift_pressed)
    ArrowKey(ArrowDirection, bool),
    /// Home key pressed (move to start of line, shift_pressed)
    Home(bool),
    /// End key pressed (move to end of line, shift_pressed)
    End(bool),
    /// Mouse clicked at position
    MouseClick(iced::Point),
    /// Mouse pressed outside of the editor
    Blur,
    /// Copy selected text (Ctrl+C)
    Copy,
    /// Paste text from clipboard (Ctrl+V)
    Paste(String),
    /// Request redraw for cursor blink
    Tick,
    /// Viewport scrolled - track scroll position
    Scrolled(iced::widget::scrollable::Viewport),
    /// Rewrite scheduled after a key was inserted
    FollowUp(FollowUp),
}

/// Arrow key directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

impl CodeEditor {
    /// Creates a new code editor.
    ///
    /// # Arguments
    ///
    /// * `content` - Initial text content
    /// * `language` - Syntax highlighting language
    ///
    /// # Example
    ///
    /// ```
    /// use iced_code_input::{CodeEditor, Language};
    ///
    /// let editor = CodeEditor::new("def main():", Language::Python);
    /// assert_eq!(editor.content(), "def main():");
    /// ```
    #[must_use]
    pub fn new(content: &str, language: Language) -> Self {
        let highlighter = Highlighter::new(language, SyntaxStyle::default());
        let style = crate::theme::dark()
            .with_syntax_background(highlighter.style());
        let highlighted = highlighter.highlight(content, style.text_color);

        Self {
            content: content.to_owned(),
            anchor: 0,
            head: 0,
            highlighter,
            highlighted,
            style,
            font_size: FONT_SIZE,
            line_height: LINE_HEIGHT,
            char_width: CHAR_WIDTH,
            line_numbers_enabled: false,
            read_only: false,
            has_focus: true,
            last_blink: Instant::now(),
            cursor_visible: true,
            cache: canvas::Cache::default(),
            scrollable_id: Id::unique(),
            viewport_scroll: 0.0,
            viewport_height: 600.0, // Default, will be updated
            on_change: None,
            on_key_press: None,
        }
    }

    /// Shows or hides line numbers next to each line.
    #[must_use]
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers_enabled = enabled;
        self
    }

    /// Makes the editor read only.
    ///
    /// A read-only editor still moves its cursor, selects and copies.
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sets whether the editor takes keyboard focus when created.
    ///
    /// Editors are focused by default.
    #[must_use]
    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.has_focus = auto_focus;
        self
    }

    /// Sets the syntax colour scheme.
    #[must_use]
    pub fn with_syntax_style(mut self, style: SyntaxStyle) -> Self {
        self.set_syntax_style(style);
        self
    }

    /// Sets the font size, scaling line height and character width with it.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        let scale = font_size / FONT_SIZE;
        self.font_size = font_size;
        self.line_height = LINE_HEIGHT * scale;
        self.char_width = CHAR_WIDTH * scale;
        self
    }

    /// Sets the viewport height for the editor.
    ///
    /// This determines the minimum height of the canvas, ensuring proper
    /// background rendering even when content is smaller than the viewport.
    #[must_use]
    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Registers a listener called with the full text after every change.
    ///
    /// # Example
    ///
    /// ```
    /// use iced_code_input::{CodeEditor, Language};
    ///
    /// let editor = CodeEditor::new("", Language::Rust)
    ///     .on_change(|text| tracing::info!(len = text.len(), "edited"));
    /// ```
    #[must_use]
    pub fn on_change(mut self, listener: impl Fn(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Registers a listener called with the raw name of every key typed,
    /// such as `"a"`, `"{"`, `"Enter"` or `"Backspace"`.
    #[must_use]
    pub fn on_key_press(mut self, listener: impl Fn(&str) + 'static) -> Self {
        self.on_key_press = Some(Box::new(listener));
        self
    }

    /// Returns the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the whole content and moves the cursor to the start.
    pub fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
        self.anchor = 0;
        self.head = 0;
        self.refresh_highlighting();
    }

    /// Returns the current selection, ordered.
    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor.min(self.head), self.anchor.max(self.head))
    }

    /// Returns the highlighting language.
    pub fn language(&self) -> Language {
        self.highlighter.language()
    }

    /// Changes the highlighting language.
    pub fn set_language(&mut self, language: Language) {
        self.highlighter = Highlighter::new(language, self.highlighter.style());
        self.refresh_highlighting();
    }

    /// Changes the syntax colour scheme.
    pub fn set_syntax_style(&mut self, style: SyntaxStyle) {
        self.highlighter = Highlighter::new(self.highlighter.language(), style);
        self.style = self.style.with_syntax_background(style);
        self.refresh_highlighting();
    }

    /// Sets the theme style for the editor.
    ///
    /// The background of the syntax colour scheme, when it has one, takes
    /// precedence over the background of `style`.
    ///
    /// # Example
    ///
    /// ```
    /// use iced_code_input::{CodeEditor, Language, theme};
    ///
    /// let mut editor = CodeEditor::new("fn main() {}", Language::Rust);
    /// editor.set_theme(theme::light());
    /// ```
    pub fn set_theme(&mut self, style: Style) {
        self.style = style.with_syntax_background(self.highlighter.style());
        self.refresh_highlighting();
    }

    /// Returns whether the editor handles keyboard input.
    pub fn is_focused(&self) -> bool {
        self.has_focus
    }

    /// Returns whether edits are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns whether line numbers are drawn.
    pub fn line_numbers_enabled(&self) -> bool {
        self.line_numbers_enabled
    }

    /// Width of the gutter, zero when line numbers are hidden.
    pub(crate) fn gutter_width(&self) -> f32 {
        if self.line_numbers_enabled {
            GUTTER_WIDTH * self.font_size / FONT_SIZE
        } else {
            0.0
        }
    }

    /// X position where the text of every line starts.
    pub(crate) fn text_origin(&self) -> f32 {
        self.gutter_width() + TEXT_PADDING
    }

    /// Resets the cursor blink animation.
    pub(crate) fn reset_cursor_blink(&mut self) {
        self.last_blink = Instant::now();
        self.cursor_visible = true;
    }

    pub(crate) fn refresh_highlighting(&mut self) {
        self.highlighted = self
            .highlighter
            .highlight(&self.content, self.style.text_color);
        self.cache.clear();
    }

    pub(crate) fn notify_change(&self) {
        if let Some(listener) = &self.on_change {
            listener(&self.content);
        }
    }

    pub(crate) fn notify_key_press(&self, key: &str) {
        if let Some(listener) = &self.on_key_press {
            listener(key);
        }
    }
}

/// Measures the rendered width of a single character.
///
/// Wide characters (CJK, emoji) take a full `font_size` cell, narrow ones a
/// `char_width` cell, and control characters take no space.
pub(crate) fn measure_char_width(ch: char, font_size: f32, char_width: f32) -> f32 {
    match ch.width() {
        Some(w) if w > 1 => font_size,
        Some(1) => char_width,
        _ => 0.0,
    }
}

/// Measures the rendered width of `text`.
pub(crate) fn measure_text_width(
    text: &str,
    font_size: f32,
    char_width: f32,
) -> f32 {
    text.chars()
        .map(|ch| measure_char_width(ch, font_size, char_width))
        .sum()
}
