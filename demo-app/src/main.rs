//! Demo application for iced-code-input.
//!
//! A toolbar on top picks the language, the syntax colour scheme and the
//! application theme and toggles line numbers and read-only mode. The editor
//! fills the rest of the window, with a status line below it.
//!
//! Key presses and text changes are logged through `tracing`; run with
//! `RUST_LOG=iced_code_input=debug,demo_editor=info` to see them.

use iced::widget::{checkbox, column, container, pick_list, row, text};
use iced::{Element, Length, Subscription, Task, Theme, window};
use iced_code_input::Message as EditorMessage;
use iced_code_input::{CodeEditor, Language, SyntaxStyle, theme};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONTENT: &str = r#"// Type Enter after an opening brace,
// or an opening bracket or quote, to try the editing rules.
const greet = (name) => {
  return `Hello, ${name}!`;
};

greet("World");
"#;

/// Main entry point for the demo application.
fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(DemoApp::new, DemoApp::update, DemoApp::view)
        .title("iced-code-input demo")
        .subscription(DemoApp::subscription)
        .theme(DemoApp::theme)
        .run()
}

/// Options the editor is built from.
#[derive(Debug, Clone, Copy)]
struct EditorOptions {
    language: Language,
    syntax_style: SyntaxStyle,
    line_numbers: bool,
    read_only: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            language: Language::JavaScript,
            syntax_style: SyntaxStyle::default(),
            line_numbers: true,
            read_only: false,
        }
    }
}

/// Demo application state.
struct DemoApp {
    editor: CodeEditor,
    options: EditorOptions,
    current_theme: Theme,
}

/// Application messages.
#[derive(Debug, Clone)]
enum Message {
    /// Editor event
    Editor(EditorMessage),
    /// Language selected
    LanguageSelected(Language),
    /// Syntax colour scheme selected
    SyntaxStyleSelected(SyntaxStyle),
    /// Application theme selected
    ThemeSelected(Theme),
    /// Line numbers toggled
    LineNumbersToggled(bool),
    /// Read-only mode toggled
    ReadOnlyToggled(bool),
    /// Cursor blink tick
    Tick,
}

/// Builds an editor with logging listeners attached.
fn build_editor(
    content: &str,
    options: EditorOptions,
    app_theme: &Theme,
) -> CodeEditor {
    let mut editor = CodeEditor::new(content, options.language)
        .with_syntax_style(options.syntax_style)
        .with_line_numbers(options.line_numbers)
        .with_read_only(options.read_only)
        .on_change(|text| {
            tracing::info!(
                chars = text.chars().count(),
                lines = text.lines().count(),
                "text changed"
            );
        })
        .on_key_press(|key| tracing::info!(key, "key pressed"));
    editor.set_theme(theme::from_iced_theme(app_theme));
    editor
}

impl DemoApp {
    /// Creates a new instance of the application.
    fn new() -> (Self, Task<Message>) {
        let options = EditorOptions::default();
        let current_theme = Theme::TokyoNightStorm;

        (
            Self {
                editor: build_editor(DEFAULT_CONTENT, options, &current_theme),
                options,
                current_theme,
            },
            Task::none(),
        )
    }

    /// Rebuilds the editor from the current options, keeping its text.
    fn rebuild_editor(&mut self) {
        self.editor = build_editor(
            self.editor.content(),
            self.options,
            &self.current_theme,
        );
    }

    /// Handles messages and updates the application state.
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Editor(event) => {
                self.editor.update(&event).map(Message::Editor)
            }
            Message::LanguageSelected(language) => {
                tracing::info!(%language, "language selected");
                self.options.language = language;
                self.editor.set_language(language);
                Task::none()
            }
            Message::SyntaxStyleSelected(style) => {
                tracing::info!(%style, "syntax style selected");
                self.options.syntax_style = style;
                self.editor.set_syntax_style(style);
                Task::none()
            }
            Message::ThemeSelected(selected) => {
                self.editor.set_theme(theme::from_iced_theme(&selected));
                self.current_theme = selected;
                Task::none()
            }
            Message::LineNumbersToggled(enabled) => {
                self.options.line_numbers = enabled;
                self.rebuild_editor();
                Task::none()
            }
            Message::ReadOnlyToggled(read_only) => {
                self.options.read_only = read_only;
                self.rebuild_editor();
                Task::none()
            }
            Message::Tick => {
                self.editor.update(&EditorMessage::Tick).map(Message::Editor)
            }
        }
    }

    /// Subscription for periodic updates.
    fn subscription(_state: &Self) -> Subscription<Message> {
        // Cursor blink
        window::frames().map(|_| Message::Tick)
    }

    /// Returns the current theme for the application.
    fn theme(&self) -> Theme {
        self.current_theme.clone()
    }

    /// Renders the user interface.
    fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            pick_list(
                Language::ALL,
                Some(self.options.language),
                Message::LanguageSelected
            ),
            pick_list(
                SyntaxStyle::ALL,
                Some(self.options.syntax_style),
                Message::SyntaxStyleSelected
            ),
            pick_list(
                Theme::ALL,
                Some(self.current_theme.clone()),
                Message::ThemeSelected
            ),
            checkbox(self.options.line_numbers)
                .label("Line numbers")
                .on_toggle(Message::LineNumbersToggled),
            checkbox(self.options.read_only)
                .label("Read only")
                .on_toggle(Message::ReadOnlyToggled),
        ]
        .spacing(10)
        .padding(10)
        .align_y(iced::Alignment::Center);

        let selection = self.editor.selection();
        let status = text(format!(
            "{} | {} chars | selection {}..{}{}",
            self.editor.language(),
            self.editor.content().chars().count(),
            selection.start,
            selection.end,
            if self.editor.is_read_only() { " | read only" } else { "" },
        ))
        .size(12);

        let editor = container(self.editor.view().map(Message::Editor))
            .width(Length::Fill)
            .height(Length::Fill);

        column![
            toolbar,
            editor,
            container(status).padding(5)
        ]
        .into()
    }
}
