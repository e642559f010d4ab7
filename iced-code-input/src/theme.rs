use iced::Color;

use crate::highlighter::SyntaxStyle;

/// The appearance of a code editor.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// Main editor background color
    pub background: Color,
    /// Text content color
    pub text_color: Color,
    /// Line numbers gutter background color
    pub gutter_background: Color,
    /// Border color for the gutter
    pub gutter_border: Color,
    /// Color for line numbers text
    pub line_number_color: Color,
    /// Scrollbar background color
    pub scrollbar_background: Color,
    /// Scrollbar scroller (thumb) color
    pub scroller_color: Color,
    /// Highlight color for the current line where cursor is located
    pub current_line_highlight: Color,
    /// Cursor (caret) color
    pub cursor_color: Color,
    /// Selection background color
    pub selection_color: Color,
}

impl Style {
    /// Replaces the background with the one of a syntax colour scheme.
    ///
    /// Schemes without a background leave the style untouched.
    #[must_use]
    pub fn with_syntax_background(mut self, style: SyntaxStyle) -> Self {
        if let Some(background) = style.background() {
            self.background = background;
            self.scrollbar_background = background;
        }
        self
    }
}

/// Creates a theme style automatically from any Iced theme.
///
/// This is the default styling function that adapts to all native Iced themes including:
/// - Basic themes: Light, Dark
/// - Popular themes: Dracula, Nord, Solarized, Gruvbox
/// - Catppuccin variants: Latte, Frappé, Macchiato, Mocha
/// - Tokyo Night variants: Tokyo Night, Storm, Light
/// - Kanagawa variants: Wave, Dragon, Lotus
/// - And more: Moonfly, Nightfly, Oxocarbon, Ferra
///
/// The function automatically detects if the theme is dark or light and adjusts
/// colors accordingly for optimal contrast and readability in code editing.
///
/// # Color Mapping
///
/// - `background`: Uses the theme's base background color
/// - `text_color`: Uses the theme's base text color
/// - `gutter_background`: Slightly darker/lighter than background
/// - `gutter_border`: Border between gutter and editor
/// - `line_number_color`: Dimmed text color for subtle line numbers
/// - `scrollbar_background`: Matches editor background
/// - `scroller_color`: Uses secondary color for visibility
/// - `current_line_highlight`: Subtle highlight using primary color
/// - `cursor_color`: The theme's primary color
/// - `selection_color`: Translucent primary color
///
/// # Example
///
/// ```
/// use iced_code_input::theme;
///
/// let tokyo_night = iced::Theme::TokyoNightStorm;
/// let style = theme::from_iced_theme(&tokyo_night);
///
/// // Or use with any theme variant
/// let dracula = iced::Theme::Dracula;
/// let style = theme::from_iced_theme(&dracula);
/// ```
pub fn from_iced_theme(theme: &iced::Theme) -> Style {
    let palette = theme.extended_palette();
    let is_dark = palette.is_dark;

    // Base colors from theme palette
    let background = palette.background.base.color;
    let text_color = palette.background.base.text;

    // Gutter colors: slightly offset from background for subtle distinction
    let gutter_background = palette.background.weak.color;
    let gutter_border = if is_dark {
        darken(palette.background.strong.color, 0.1)
    } else {
        lighten(palette.background.strong.color, 0.1)
    };

    // Line numbers: dimmed text color for subtlety
    // For dark themes: dim the bright text (make it darker)
    // For light themes: blend text towards background (make it lighter/grayer)
    let line_number_color = if is_dark {
        dim_color(text_color, 0.5)
    } else {
        // For light themes, blend text color towards background
        blend_colors(text_color, background, 0.5)
    };

    // Scrollbar colors: blend with background
    let scrollbar_background = background;
    let scroller_color = palette.secondary.weak.color;

    // Current line highlight: very subtle with primary color
    let current_line_highlight = with_alpha(
        palette.primary.weak.color,
        if is_dark { 0.15 } else { 0.25 },
    );

    let cursor_color = palette.primary.base.color;
    let selection_color = with_alpha(palette.primary.base.color, 0.3);

    Style {
        background,
        text_color,
        gutter_background,
        gutter_border,
        line_number_color,
        scrollbar_background,
        scroller_color,
        current_line_highlight,
        cursor_color,
        selection_color,
    }
}

/// The default dark style.
#[must_use]
pub fn dark() -> Style {
    from_iced_theme(&iced::Theme::Dark)
}

/// The default light style.
#[must_use]
pub fn light() -> Style {
    from_iced_theme(&iced::Theme::Light)
}

/// Darkens a color by a given factor (0.0 to 1.0).
fn darken(color: Color, factor: f32) -> Color {
    Color {
        r: color.r * (1.0 - factor),
        g: color.g * (1.0 - factor),
        b: color.b * (1.0 - factor),
        a: color.a,
    }
}

/// Lightens a color by a given factor (0.0 to 1.0).
fn lighten(color: Color, factor: f32) -> Color {
    Color {
        r: color.r + (1.0 - color.r) * factor,
        g: color.g + (1.0 - color.g) * factor,
        b: color.b + (1.0 - color.b) * factor,
        a: color.a,
    }
}

/// Dims a color by reducing its intensity.
fn dim_color(color: Color, factor: f32) -> Color {
    Color {
        r: color.r * factor,
        g: color.g * factor,
        b: color.b * factor,
        a: color.a,
    }
}

/// Blends two colors together by a given factor (0.0 = first color, 1.0 = second color).
fn blend_colors(color1: Color, color2: Color, factor: f32) -> Color {
    Color {
        r: color1.r + (color2.r - color1.r) * factor,
        g: color1.g + (color2.g - color1.g) * factor,
        b: color1.b + (color2.b - color1.b) * factor,
        a: color1.a + (color2.a - color1.a) * factor,
    }
}

/// Applies an alpha transparency to a color.
fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { r: color.r, g: color.g, b: color.b, a: alpha }
}
