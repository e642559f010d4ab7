//! Canvas rendering implementation using Iced's `canvas::Program`.

use iced::keyboard::key::Named;
use iced::mouse;
use iced::widget::canvas::{self, Action, Geometry};
use iced::{Event, Font, Point, Rectangle, Size, Theme, keyboard};

use super::{ArrowDirection, CodeEditor, Message, measure_text_width};

/// Computes the x start and width of the columns `start_col..end_col` of
/// `line`, measured from `base_offset`.
fn segment_geometry(
    line: &str,
    start_col: usize,
    end_col: usize,
    base_offset: f32,
    font_size: f32,
    char_width: f32,
) -> (f32, f32) {
    let prefix: String = line.chars().take(start_col).collect();
    let segment: String = line
        .chars()
        .skip(start_col)
        .take(end_col.saturating_sub(start_col))
        .collect();

    (
        base_offset + measure_text_width(&prefix, font_size, char_width),
        measure_text_width(&segment, font_size, char_width),
    )
}

impl canvas::Program<Message> for CodeEditor {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let lines: Vec<&str> = self.content.split('\n').collect();
            let text_origin = self.text_origin();
            let (cursor_line, cursor_col) = self.line_col(self.head);

            // Only draw the lines inside the viewport
            let effective_viewport_height = if self.viewport_height > 0.0 {
                self.viewport_height
            } else {
                bounds.height
            };
            let first_visible_line =
                (self.viewport_scroll / self.line_height).floor() as usize;
            let visible_lines_count =
                (effective_viewport_height / self.line_height).ceil() as usize
                    + 2;
            let last_visible_line =
                (first_visible_line + visible_lines_count).min(lines.len());

            // Gutter and code backgrounds are containers in view.rs
            if self.line_numbers_enabled {
                frame.fill_rectangle(
                    Point::new(self.gutter_width() - 1.0, 0.0),
                    Size::new(1.0, bounds.height),
                    self.style.gutter_border,
                );
            }

            for (idx, line) in lines
                .iter()
                .enumerate()
                .skip(first_visible_line)
                .take(last_visible_line.saturating_sub(first_visible_line))
            {
                let y = idx as f32 * self.line_height;

                if self.line_numbers_enabled {
                    let line_num_text = (idx + 1).to_string();
                    let text_width = measure_text_width(
                        &line_num_text,
                        self.font_size,
                        self.char_width,
                    );
                    let x_pos = (self.gutter_width() - text_width) / 2.0;
                    frame.fill_text(canvas::Text {
                        content: line_num_text,
                        position: Point::new(x_pos, y + 2.0),
                        color: self.style.line_number_color,
                        size: self.font_size.into(),
                        font: Font::MONOSPACE,
                        ..canvas::Text::default()
                    });
                }

                if self.has_focus && idx == cursor_line {
                    frame.fill_rectangle(
                        Point::new(self.gutter_width(), y),
                        Size::new(
                            bounds.width - self.gutter_width(),
                            self.line_height,
                        ),
                        self.style.current_line_highlight,
                    );
                }

                let mut x_offset = text_origin;
                let tokens = self.highlighted.get(idx).map_or(&[][..], Vec::as_slice);
                if tokens.is_empty() && !line.is_empty() {
                    // Highlighting lags behind the buffer, draw plain text
                    frame.fill_text(canvas::Text {
                        content: (*line).to_owned(),
                        position: Point::new(x_offset, y + 2.0),
                        color: self.style.text_color,
                        size: self.font_size.into(),
                        font: Font::MONOSPACE,
                        ..canvas::Text::default()
                    });
                }
                for token in tokens {
                    frame.fill_text(canvas::Text {
                        content: token.text.clone(),
                        position: Point::new(x_offset, y + 2.0),
                        color: token.color,
                        size: self.font_size.into(),
                        font: Font::MONOSPACE,
                        ..canvas::Text::default()
                    });
                    x_offset += measure_text_width(
                        &token.text,
                        self.font_size,
                        self.char_width,
                    );
                }
            }

            // Draw selection highlight
            let selection = self.selection();
            if !selection.is_collapsed() {
                let (start_line, start_col) = self.line_col(selection.start);
                let (end_line, end_col) = self.line_col(selection.end);

                for (idx, line) in lines
                    .iter()
                    .enumerate()
                    .skip(start_line.max(first_visible_line))
                    .take_while(|(idx, _)| *idx <= end_line)
                {
                    let from = if idx == start_line { start_col } else { 0 };
                    let to = if idx == end_line {
                        end_col
                    } else {
                        line.chars().count()
                    };

                    let (x_start, width) = segment_geometry(
                        line,
                        from,
                        to,
                        text_origin,
                        self.font_size,
                        self.char_width,
                    );
                    // Selected newlines show as one narrow cell
                    let width = if idx == end_line {
                        width
                    } else {
                        width + self.char_width
                    };

                    frame.fill_rectangle(
                        Point::new(x_start, idx as f32 * self.line_height + 2.0),
                        Size::new(width, self.line_height - 4.0),
                        self.style.selection_color,
                    );
                }
            }

            // Draw the caret
            if self.has_focus && self.cursor_visible {
                let line = lines.get(cursor_line).copied().unwrap_or_default();
                let (cursor_x, _) = segment_geometry(
                    line,
                    cursor_col,
                    cursor_col,
                    text_origin,
                    self.font_size,
                    self.char_width,
                );
                let cursor_y = cursor_line as f32 * self.line_height;

                frame.fill_rectangle(
                    Point::new(cursor_x, cursor_y + 2.0),
                    Size::new(2.0, self.line_height - 4.0),
                    self.style.cursor_color,
                );
            }
        });

        vec![geometry]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key,
                modifiers,
                text,
                ..
            }) => {
                if !self.has_focus {
                    return None;
                }

                // Handle Ctrl+C / Ctrl+Insert (copy)
                if (modifiers.command()
                    && matches!(key, keyboard::Key::Character(c) if c.as_str() == "c"))
                    || (modifiers.control()
                        && matches!(key, keyboard::Key::Named(Named::Insert)))
                {
                    return Some(Action::publish(Message::Copy).and_capture());
                }

                // Handle Ctrl+V / Shift+Insert (paste), the clipboard is read
                // by the update
                if (modifiers.command()
                    && matches!(key, keyboard::Key::Character(v) if v.as_str() == "v"))
                    || (modifiers.shift()
                        && matches!(key, keyboard::Key::Named(Named::Insert)))
                {
                    return Some(
                        Action::publish(Message::Paste(String::new()))
                            .and_capture(),
                    );
                }

                // Printable text first, this covers shifted keys, numpad
                // digits and international layouts
                if let Some(text_content) = text
                    && !modifiers.control()
                    && !modifiers.alt()
                    && let Some(first_char) = text_content.chars().next()
                    && !first_char.is_control()
                {
                    return Some(
                        Action::publish(Message::CharacterInput(first_char))
                            .and_capture(),
                    );
                }

                let message = match key {
                    keyboard::Key::Named(Named::Backspace) => {
                        Some(Message::Backspace)
                    }
                    keyboard::Key::Named(Named::Delete) => Some(Message::Delete),
                    keyboard::Key::Named(Named::Enter) => Some(Message::Enter),
                    keyboard::Key::Named(Named::Tab) => Some(Message::Tab),
                    keyboard::Key::Named(Named::ArrowUp) => Some(
                        Message::ArrowKey(ArrowDirection::Up, modifiers.shift()),
                    ),
                    keyboard::Key::Named(Named::ArrowDown) => Some(
                        Message::ArrowKey(ArrowDirection::Down, modifiers.shift()),
                    ),
                    keyboard::Key::Named(Named::ArrowLeft) => Some(
                        Message::ArrowKey(ArrowDirection::Left, modifiers.shift()),
                    ),
                    keyboard::Key::Named(Named::ArrowRight) => Some(
                        Message::ArrowKey(ArrowDirection::Right, modifiers.shift()),
                    ),
                    keyboard::Key::Named(Named::Home) => {
                        Some(Message::Home(modifiers.shift()))
                    }
                    keyboard::Key::Named(Named::End) => {
                        Some(Message::End(modifiers.shift()))
                    }
                    keyboard::Key::Named(Named::Space) => {
                        Some(Message::CharacterInput(' '))
                    }
                    keyboard::Key::Character(c)
                        if !modifiers.control() && !modifiers.alt() =>
                    {
                        c.chars().next().map(Message::CharacterInput)
                    }
                    _ => None,
                };

                message.map(|msg| Action::publish(msg).and_capture())
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                match cursor.position_in(bounds) {
                    // Don't capture the event so it can bubble up for focus management
                    Some(position) => {
                        Some(Action::publish(Message::MouseClick(position)))
                    }
                    None if self.has_focus => {
                        Some(Action::publish(Message::Blur))
                    }
                    None => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_editor::{CHAR_WIDTH, FONT_SIZE};

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_segment_geometry_ascii() {
        let (x, width) =
            segment_geometry("hello world", 6, 11, 10.0, FONT_SIZE, CHAR_WIDTH);
        assert!(approx_eq(x, 10.0 + CHAR_WIDTH * 6.0));
        assert!(approx_eq(width, CHAR_WIDTH * 5.0));
    }

    #[test]
    fn test_segment_geometry_cjk() {
        let (x, width) =
            segment_geometry("ab你好", 2, 4, 0.0, FONT_SIZE, CHAR_WIDTH);
        assert!(approx_eq(x, CHAR_WIDTH * 2.0));
        assert!(approx_eq(width, FONT_SIZE * 2.0));
    }

    #[test]
    fn test_segment_geometry_empty_range() {
        let (x, width) = segment_geometry("abc", 1, 1, 0.0, FONT_SIZE, CHAR_WIDTH);
        assert!(approx_eq(x, CHAR_WIDTH));
        assert!(approx_eq(width, 0.0));
    }

    #[test]
    fn test_segment_geometry_out_of_bounds() {
        let (x, width) = segment_geometry("abc", 2, 10, 0.0, FONT_SIZE, CHAR_WIDTH);
        assert!(approx_eq(x, CHAR_WIDTH * 2.0));
        assert!(approx_eq(width, CHAR_WIDTH));
    }

    #[test]
    fn test_segment_geometry_inverted_range() {
        let (_, width) = segment_geometry("abc", 2, 1, 0.0, FONT_SIZE, CHAR_WIDTH);
        assert!(approx_eq(width, 0.0));
    }
}
