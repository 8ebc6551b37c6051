use unicode_width::UnicodeWidthStr;

/// A single-line text buffer with a byte-indexed cursor.
///
/// Used for the search field and the command line. The cursor always sits on
/// a char boundary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in bytes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width of the text before the cursor, for terminal cursor placement.
    pub fn cursor_column(&self) -> u16 {
        self.text[..self.cursor].width() as u16
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor. Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Move cursor one character left.
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    /// Move cursor one character right.
    pub fn cursor_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    /// Clear the buffer. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        self.cursor = 0;
        changed
    }

    /// Take the text out, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_buffer_operations() {
        let mut input = LineInput::new();

        for c in "hello".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.as_str(), "hello");
        assert_eq!(input.cursor(), 5);

        assert!(input.backspace());
        assert_eq!(input.as_str(), "hell");
        assert_eq!(input.cursor(), 4);

        input.cursor_left();
        assert_eq!(input.cursor(), 3);

        input.insert_char('X');
        assert_eq!(input.as_str(), "helXl");
        assert_eq!(input.cursor(), 4);

        input.cursor_right();
        assert_eq!(input.cursor(), 5);
        input.cursor_right();
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_multibyte_chars() {
        let mut input = LineInput::new();
        input.insert_char('é');
        input.insert_char('x');
        assert_eq!(input.cursor(), 3);
        assert_eq!(input.cursor_column(), 2);

        input.cursor_left();
        input.cursor_left();
        assert_eq!(input.cursor(), 0);
        input.cursor_right();
        assert_eq!(input.cursor(), 2);

        assert!(input.backspace());
        assert_eq!(input.as_str(), "x");
        assert_eq!(input.cursor(), 0);
        assert!(!input.backspace());
    }

    #[test]
    fn test_clear_and_take() {
        let mut input = LineInput::new();
        assert!(!input.clear());
        input.insert_char('q');
        assert_eq!(input.take(), "q");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
