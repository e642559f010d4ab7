//! Syntax highlighting through `syntect`.
//!
//! The highlighter is only used for rendering. Indentation and brace
//! decisions never look at its tokens.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use iced::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::error::{Error, Result};

static SYNTAX_SET: LazyLock<SyntaxSet> =
    LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Languages supported by the highlighter.
///
/// # Examples
///
/// ```
/// use iced_code_input::Language;
///
/// let language: Language = "js".parse()?;
/// assert_eq!(language, Language::JavaScript);
/// # Ok::<(), iced_code_input::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Css,
    Go,
    Html,
    Java,
    #[default]
    JavaScript,
    Json,
    Lua,
    Markdown,
    Php,
    PlainText,
    Python,
    Ruby,
    Rust,
    Shell,
    Sql,
    Xml,
    Yaml,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 20] = [
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Css,
        Language::Go,
        Language::Html,
        Language::Java,
        Language::JavaScript,
        Language::Json,
        Language::Lua,
        Language::Markdown,
        Language::Php,
        Language::PlainText,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Shell,
        Language::Sql,
        Language::Xml,
        Language::Yaml,
    ];

    /// Returns the canonical tag of the language.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Css => "css",
            Self::Go => "go",
            Self::Html => "html",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Json => "json",
            Self::Lua => "lua",
            Self::Markdown => "markdown",
            Self::Php => "php",
            Self::PlainText => "plaintext",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
            Self::Shell => "shell",
            Self::Sql => "sql",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
        }
    }

    /// File extension syntect knows the grammar by.
    const fn extension(self) -> Option<&'static str> {
        match self {
            Self::C => Some("c"),
            Self::Cpp => Some("cpp"),
            Self::CSharp => Some("cs"),
            Self::Css => Some("css"),
            Self::Go => Some("go"),
            Self::Html => Some("html"),
            Self::Java => Some("java"),
            Self::JavaScript => Some("js"),
            Self::Json => Some("json"),
            Self::Lua => Some("lua"),
            Self::Markdown => Some("md"),
            Self::Php => Some("php"),
            Self::PlainText => None,
            Self::Python => Some("py"),
            Self::Ruby => Some("rb"),
            Self::Rust => Some("rs"),
            Self::Shell => Some("sh"),
            Self::Sql => Some("sql"),
            Self::Xml => Some("xml"),
            Self::Yaml => Some("yaml"),
        }
    }

    fn syntax(self) -> &'static SyntaxReference {
        self.extension()
            .and_then(|ext| SYNTAX_SET.find_syntax_by_extension(ext))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        let language = match tag.trim().to_ascii_lowercase().as_str() {
            "c" | "h" => Self::C,
            "cpp" | "c++" | "cc" | "hpp" => Self::Cpp,
            "csharp" | "c#" | "cs" => Self::CSharp,
            "css" => Self::Css,
            "go" | "golang" => Self::Go,
            "html" | "htm" => Self::Html,
            "java" => Self::Java,
            "javascript" | "js" | "jsx" | "mjs" => Self::JavaScript,
            "json" => Self::Json,
            "lua" => Self::Lua,
            "markdown" | "md" => Self::Markdown,
            "php" => Self::Php,
            "plaintext" | "text" | "txt" => Self::PlainText,
            "python" | "py" => Self::Python,
            "ruby" | "rb" => Self::Ruby,
            "rust" | "rs" => Self::Rust,
            "shell" | "bash" | "sh" => Self::Shell,
            "sql" => Self::Sql,
            "xml" | "svg" => Self::Xml,
            "yaml" | "yml" => Self::Yaml,
            _ => return Err(Error::UnsupportedLanguage(tag.to_owned())),
        };
        Ok(language)
    }
}

/// Colour schemes bundled with `syntect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyntaxStyle {
    #[default]
    OceanDark,
    OceanLight,
    EightiesDark,
    MochaDark,
    InspiredGitHub,
    SolarizedDark,
    SolarizedLight,
}

impl SyntaxStyle {
    pub const ALL: [SyntaxStyle; 7] = [
        SyntaxStyle::OceanDark,
        SyntaxStyle::OceanLight,
        SyntaxStyle::EightiesDark,
        SyntaxStyle::MochaDark,
        SyntaxStyle::InspiredGitHub,
        SyntaxStyle::SolarizedDark,
        SyntaxStyle::SolarizedLight,
    ];

    /// Name of the theme in syntect's default theme set.
    #[must_use]
    pub const fn theme_name(self) -> &'static str {
        match self {
            Self::OceanDark => "base16-ocean.dark",
            Self::OceanLight => "base16-ocean.light",
            Self::EightiesDark => "base16-eighties.dark",
            Self::MochaDark => "base16-mocha.dark",
            Self::InspiredGitHub => "InspiredGitHub",
            Self::SolarizedDark => "Solarized (dark)",
            Self::SolarizedLight => "Solarized (light)",
        }
    }

    fn theme(self) -> Option<&'static Theme> {
        THEME_SET.themes.get(self.theme_name())
    }

    /// Background colour defined by the scheme, if any.
    #[must_use]
    pub fn background(self) -> Option<Color> {
        self.theme()
            .and_then(|theme| theme.settings.background)
            .map(to_color)
    }

    /// Default foreground colour defined by the scheme, if any.
    #[must_use]
    pub fn foreground(self) -> Option<Color> {
        self.theme()
            .and_then(|theme| theme.settings.foreground)
            .map(to_color)
    }
}

impl fmt::Display for SyntaxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.theme_name())
    }
}

impl FromStr for SyntaxStyle {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.theme_name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::UnknownSyntaxStyle(name.to_owned()))
    }
}

/// A run of text drawn in a single colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub color: Color,
}

/// Produces coloured tokens for source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlighter {
    language: Language,
    style: SyntaxStyle,
}

impl Highlighter {
    #[must_use]
    pub const fn new(language: Language, style: SyntaxStyle) -> Self {
        Self { language, style }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn style(&self) -> SyntaxStyle {
        self.style
    }

    /// Highlights `source`, returning one token list per line.
    ///
    /// Line terminators are not part of the tokens. A line that syntect fails
    /// to parse is returned as a single token in `fallback` colour.
    #[must_use]
    pub fn highlight(&self, source: &str, fallback: Color) -> Vec<Vec<Token>> {
        let Some(theme) = self.style.theme() else {
            tracing::warn!(style = %self.style, "syntax theme not found");
            return source
                .split('\n')
                .map(|line| plain_line(line, fallback))
                .collect();
        };

        let mut lines = HighlightLines::new(self.language.syntax(), theme);
        source
            .split_inclusive('\n')
            .chain(source.ends_with('\n').then_some(""))
            .chain(source.is_empty().then_some(""))
            .map(|line| {
                highlight_line(&mut lines, line)
                    .unwrap_or_else(|err| {
                        tracing::warn!(%err, "falling back to plain text");
                        plain_line(line, fallback)
                    })
            })
            .collect()
    }
}

fn highlight_line(
    lines: &mut HighlightLines<'_>,
    line: &str,
) -> Result<Vec<Token>> {
    let ranges = lines.highlight_line(line, &SYNTAX_SET)?;
    Ok(ranges
        .into_iter()
        .map(|(style, text)| Token {
            text: text.trim_end_matches('\n').to_owned(),
            color: to_color(style.foreground),
        })
        .filter(|token| !token.text.is_empty())
        .collect())
}

fn plain_line(line: &str, color: Color) -> Vec<Token> {
    let text = line.trim_end_matches('\n');
    if text.is_empty() {
        return Vec::new();
    }
    vec![Token { text: text.to_owned(), color }]
}

fn to_color(color: syntect::highlighting::Color) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, f32::from(color.a) / 255.0)
}
