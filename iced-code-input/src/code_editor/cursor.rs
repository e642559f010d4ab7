//! Cursor movement and positioning logic.

use iced::widget::operation::scroll_to;
use iced::widget::scrollable;
use iced::{Point, Task};

use super::{ArrowDirection, CodeEditor, Message};

impl CodeEditor {
    /// Number of lines, an empty buffer has one.
    pub(crate) fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Converts a character offset into a `(line, column)` pair.
    pub(crate) fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.content.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Converts a `(line, column)` pair into a character offset.
    ///
    /// Columns past the end of the line clamp to the line end, lines past the
    /// end of the buffer clamp to the buffer end.
    pub(crate) fn offset_at(&self, line: usize, col: usize) -> usize {
        let mut offset = 0;
        for (idx, text) in self.content.split('\n').enumerate() {
            let len = text.chars().count();
            if idx == line {
                return offset + col.min(len);
            }
            offset += len + 1;
        }
        self.char_count()
    }

    fn line_len(&self, line: usize) -> usize {
        self.content
            .split('\n')
            .nth(line)
            .map_or(0, |text| text.chars().count())
    }

    /// Moves the selection head to `offset`, extending the selection when
    /// `extend` is set and collapsing it otherwise.
    pub(crate) fn set_head(&mut self, offset: usize, extend: bool) {
        self.head = offset.min(self.char_count());
        if !extend {
            self.anchor = self.head;
        }
        self.reset_cursor_blink();
        self.cache.clear();
    }

    /// Moves the cursor based on arrow key direction.
    ///
    /// Without `extend`, Left and Right on a selection collapse it to the
    /// matching edge.
    pub(crate) fn move_cursor(&mut self, direction: ArrowDirection, extend: bool) {
        let selection = self.selection();
        let (line, col) = self.line_col(self.head);

        let target = match direction {
            ArrowDirection::Left if !extend && !selection.is_collapsed() => {
                selection.start
            }
            ArrowDirection::Right if !extend && !selection.is_collapsed() => {
                selection.end
            }
            ArrowDirection::Left => self.head.saturating_sub(1),
            ArrowDirection::Right => self.head + 1,
            ArrowDirection::Up if line == 0 => 0,
            ArrowDirection::Up => self.offset_at(line - 1, col),
            ArrowDirection::Down if line + 1 >= self.line_count() => {
                self.char_count()
            }
            ArrowDirection::Down => self.offset_at(line + 1, col),
        };

        self.set_head(target, extend);
    }

    /// Moves the cursor to the start of its line.
    pub(crate) fn move_to_line_start(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.head);
        self.set_head(self.offset_at(line, 0), extend);
    }

    /// Moves the cursor to the end of its line.
    pub(crate) fn move_to_line_end(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.head);
        self.set_head(self.offset_at(line, self.line_len(line)), extend);
    }

    /// Computes the character offset under a point in canvas coordinates.
    ///
    /// Clicks in the gutter land at the start of the line, clicks below the
    /// last line at the end of the buffer. Each character is hit from its
    /// horizontal midpoint, so wide characters take a full font-size cell.
    pub(crate) fn offset_from_point(&self, point: Point) -> usize {
        let line = (point.y.max(0.0) / self.line_height) as usize;
        if line >= self.line_count() {
            return self.char_count();
        }

        let x_in_text = point.x - self.text_origin();
        let line_content = self.content.split('\n').nth(line).unwrap_or_default();

        let mut current_width = 0.0;
        let mut col = 0;
        for ch in line_content.chars() {
            let width =
                super::measure_char_width(ch, self.font_size, self.char_width);
            if current_width + width / 2.0 > x_in_text {
                break;
            }
            current_width += width;
            col += 1;
        }

        self.offset_at(line, col)
    }

    /// Handles mouse clicks to position the cursor.
    pub(crate) fn handle_mouse_click(&mut self, point: Point) {
        let offset = self.offset_from_point(point);
        self.set_head(offset, false);
    }

    /// Returns a scroll command to make the cursor visible.
    pub(crate) fn scroll_to_cursor(&self) -> Task<Message> {
        let (line, _) = self.line_col(self.head);
        let cursor_y = line as f32 * self.line_height;

        let viewport_top = self.viewport_scroll;
        let viewport_bottom = self.viewport_scroll + self.viewport_height;

        // Keep a margin so the cursor never sits exactly on the edge
        let margin = self.line_height * 2.0;

        let new_scroll = if cursor_y < viewport_top + margin {
            (cursor_y - margin).max(0.0)
        } else if cursor_y + self.line_height > viewport_bottom - margin {
            cursor_y + self.line_height + margin - self.viewport_height
        } else {
            return Task::none();
        };

        scroll_to(
            self.scrollable_id.clone(),
            scrollable::AbsoluteOffset { x: 0.0, y: new_scroll },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_editor::{CHAR_WIDTH, FONT_SIZE, LINE_HEIGHT, TEXT_PADDING};
    use crate::highlighter::Language;
    use crate::protocol::Selection;

    fn editor_at(content: &str, head: usize) -> CodeEditor {
        let mut editor = CodeEditor::new(content, Language::Rust);
        editor.set_head(head, false);
        editor
    }

    #[test]
    fn test_line_col_round_trip() {
        let editor = editor_at("ab\ncde\n\nf", 0);
        assert_eq!(editor.line_count(), 4);
        assert_eq!(editor.line_col(0), (0, 0));
        assert_eq!(editor.line_col(2), (0, 2));
        assert_eq!(editor.line_col(3), (1, 0));
        assert_eq!(editor.line_col(7), (2, 0));
        assert_eq!(editor.line_col(9), (3, 1));
        assert_eq!(editor.offset_at(1, 2), 5);
        assert_eq!(editor.offset_at(2, 5), 7);
        assert_eq!(editor.offset_at(9, 0), 9);
    }

    #[test]
    fn test_cursor_movement() {
        let mut editor = editor_at("line1\nline2", 0);
        editor.move_cursor(ArrowDirection::Down, false);
        assert_eq!(editor.selection(), Selection::collapsed(6));
        editor.move_cursor(ArrowDirection::Right, false);
        assert_eq!(editor.selection(), Selection::collapsed(7));
        editor.move_cursor(ArrowDirection::Up, false);
        assert_eq!(editor.selection(), Selection::collapsed(1));
        editor.move_cursor(ArrowDirection::Left, false);
        editor.move_cursor(ArrowDirection::Left, false);
        assert_eq!(editor.selection(), Selection::collapsed(0));
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut editor = editor_at("long line\nab", 8);
        editor.move_cursor(ArrowDirection::Down, false);
        assert_eq!(editor.selection(), Selection::collapsed(12));
    }

    #[test]
    fn test_vertical_movement_at_edges() {
        let mut editor = editor_at("abc\ndef", 5);
        editor.move_cursor(ArrowDirection::Down, false);
        assert_eq!(editor.selection(), Selection::collapsed(7));
        editor.move_cursor(ArrowDirection::Up, false);
        editor.move_cursor(ArrowDirection::Up, false);
        assert_eq!(editor.selection(), Selection::collapsed(0));
    }

    #[test]
    fn test_shift_arrow_extends_selection() {
        let mut editor = editor_at("hello", 1);
        editor.move_cursor(ArrowDirection::Right, true);
        editor.move_cursor(ArrowDirection::Right, true);
        assert_eq!(editor.selection(), Selection::new(1, 3));
    }

    #[test]
    fn test_arrow_collapses_selection_to_edge() {
        let mut editor = editor_at("hello", 1);
        editor.set_head(4, true);
        editor.move_cursor(ArrowDirection::Left, false);
        assert_eq!(editor.selection(), Selection::collapsed(1));

        editor.set_head(4, true);
        editor.move_cursor(ArrowDirection::Right, false);
        assert_eq!(editor.selection(), Selection::collapsed(4));
    }

    #[test]
    fn test_line_start_and_end() {
        let mut editor = editor_at("one\n  two\nthree", 6);
        editor.move_to_line_end(false);
        assert_eq!(editor.selection(), Selection::collapsed(9));
        editor.move_to_line_start(true);
        assert_eq!(editor.selection(), Selection::new(4, 9));
    }

    #[test]
    fn test_click_positions_cursor() {
        let mut editor = editor_at("abc\ndef", 0);
        let x = TEXT_PADDING + CHAR_WIDTH * 2.0 + 1.0;
        editor.handle_mouse_click(Point::new(x, LINE_HEIGHT * 1.5));
        assert_eq!(editor.selection(), Selection::collapsed(6));
    }

    #[test]
    fn test_click_below_last_line() {
        let mut editor = editor_at("abc\ndef", 0);
        editor.handle_mouse_click(Point::new(0.0, LINE_HEIGHT * 10.0));
        assert_eq!(editor.selection(), Selection::collapsed(7));
    }

    #[test]
    fn test_click_in_gutter_lands_at_line_start() {
        let mut editor = editor_at("abc\ndef", 0).with_line_numbers(true);
        editor.handle_mouse_click(Point::new(2.0, LINE_HEIGHT * 1.5));
        assert_eq!(editor.selection(), Selection::collapsed(4));
    }

    #[test]
    fn test_cursor_click_cjk() {
        let mut editor = editor_at("你好世界", 0);
        // Past the midpoint of the second wide character
        let x = TEXT_PADDING + FONT_SIZE * 1.6;
        editor.handle_mouse_click(Point::new(x, 5.0));
        assert_eq!(editor.selection(), Selection::collapsed(2));
    }
}
