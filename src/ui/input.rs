//! Input box component for the draft message
//!
//! The draft is a single line of text (Enter submits, it never contains a
//! newline) that wraps across rows when it outgrows the box. Wrapping is
//! done by display width per character so the cursor position and the
//! rendered rows are computed by the same pass and cannot drift apart.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

const PLACEHOLDER: &str = "Type your thoughts...";

/// Editable draft text with a byte-offset cursor
#[derive(Debug, Default)]
pub struct InputBox {
    content: String,
    /// Byte offset into `content`, always on a char boundary
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current draft, verbatim
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the draft (on successful send, or Esc)
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the char before the cursor (Backspace)
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the char under the cursor (Delete)
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.content.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        let mut prev = self.cursor - 1;
        while !self.content.is_char_boundary(prev) {
            prev -= 1;
        }
        Some(prev)
    }

    /// Height the box wants for the given terminal width, borders included
    pub fn required_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1);
        let (rows, _, _) = layout_rows(&self.content, self.cursor, inner as usize);
        (rows.len() as u16).saturating_add(2).max(3)
    }

    pub fn widget(&self) -> InputBoxWidget<'_> {
        InputBoxWidget { input: self }
    }
}

/// Pack chars into rows of at most `width` display columns, tracking where
/// the cursor byte offset lands. Returns (rows, cursor_row, cursor_col).
fn layout_rows(content: &str, cursor: usize, width: usize) -> (Vec<String>, usize, usize) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0usize;
    let mut cursor_pos = None;

    for (idx, c) in content.char_indices() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if col + cw > width && col > 0 {
            rows.push(String::new());
            col = 0;
        }
        if idx == cursor {
            cursor_pos = Some((rows.len() - 1, col));
        }
        rows.last_mut().expect("rows is never empty").push(c);
        col += cw;
    }

    // Cursor past the last char: wraps to a fresh row if the current one is full
    let (cursor_row, cursor_col) = cursor_pos.unwrap_or_else(|| {
        if col >= width {
            rows.push(String::new());
            (rows.len() - 1, 0)
        } else {
            (rows.len() - 1, col)
        }
    });

    (rows, cursor_row, cursor_col)
}

/// Widget rendering the draft with a visible cursor cell
pub struct InputBoxWidget<'a> {
    input: &'a InputBox,
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Message ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.input.is_empty() {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            )));
            placeholder.render(inner, buf);
            buf.set_style(
                Rect::new(inner.x, inner.y, 1, 1),
                Style::default().add_modifier(Modifier::REVERSED),
            );
            return;
        }

        let (rows, cursor_row, cursor_col) =
            layout_rows(&self.input.content, self.input.cursor, inner.width as usize);

        // Keep the cursor row visible when the draft outgrows the box
        let visible = inner.height as usize;
        let first = cursor_row.saturating_sub(visible - 1);

        let lines: Vec<Line<'_>> = rows
            .iter()
            .skip(first)
            .take(visible)
            .map(|r| Line::from(Span::raw(r.as_str())))
            .collect();
        Paragraph::new(lines).render(inner, buf);

        let cursor_x = inner.x + cursor_col.min(inner.width as usize - 1) as u16;
        let cursor_y = inner.y + (cursor_row - first) as u16;
        buf.set_style(
            Rect::new(cursor_x, cursor_y, 1, 1),
            Style::default().add_modifier(Modifier::REVERSED),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn test_insert_and_content() {
        let input = typed("hello");
        assert_eq!(input.content(), "hello");
        assert!(!input.is_empty());
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut input = typed("hllo");
        input.move_cursor_start();
        input.move_cursor_right();
        input.insert_char('e');
        assert_eq!(input.content(), "hello");
    }

    #[test]
    fn test_backspace_removes_before_cursor() {
        let mut input = typed("hello");
        input.delete_char();
        assert_eq!(input.content(), "hell");

        // Backspace at the start is a no-op
        input.move_cursor_start();
        input.delete_char();
        assert_eq!(input.content(), "hell");
    }

    #[test]
    fn test_delete_forward() {
        let mut input = typed("hello");
        input.move_cursor_start();
        input.delete_char_forward();
        assert_eq!(input.content(), "ello");

        input.move_cursor_end();
        input.delete_char_forward();
        assert_eq!(input.content(), "ello");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("héllo");
        input.move_cursor_start();
        input.move_cursor_right();
        input.move_cursor_right();
        input.delete_char();
        assert_eq!(input.content(), "hllo");

        input.insert_char('é');
        assert_eq!(input.content(), "héllo");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = typed("hello");
        input.clear();
        assert!(input.is_empty());
        input.insert_char('a');
        assert_eq!(input.content(), "a");
    }

    #[test]
    fn test_layout_rows_wraps_by_width() {
        let (rows, _, _) = layout_rows("abcdefghij", 0, 4);
        assert_eq!(rows, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_layout_cursor_positions() {
        // Cursor mid-text
        let (_, row, col) = layout_rows("abcdefghij", 5, 4);
        assert_eq!((row, col), (1, 1));

        // Cursor at end of a full row wraps to the next
        let (rows, row, col) = layout_rows("abcd", 4, 4);
        assert_eq!(rows.len(), 2);
        assert_eq!((row, col), (1, 0));

        // Cursor at end of a partial row stays on it
        let (_, row, col) = layout_rows("abc", 3, 4);
        assert_eq!((row, col), (0, 3));
    }

    #[test]
    fn test_required_height_grows_with_content() {
        let input = typed("hi");
        assert_eq!(input.required_height(20), 3);

        let long = typed(&"x".repeat(50));
        // 50 chars at inner width 18 -> 3 rows + 2 borders
        assert_eq!(long.required_height(20), 5);
    }
}
