/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigating the board
    #[default]
    Normal,
    /// Typing into the new-task field
    Editing,
}

/// Single-line text field. `cursor` is a char index in `0..=char_count`.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Text split at the cursor, for drawing the caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_offset(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in s.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn test_insert_at_cursor_multibyte() {
        let mut input = typed("héllo");
        input.home();
        input.move_right();
        input.move_right();
        input.insert('X');
        assert_eq!(input.text(), "héXllo");
        assert_eq!(input.split_at_cursor(), ("héX", "llo"));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = typed("añb");
        input.backspace();
        assert_eq!(input.text(), "añ");
        input.home();
        input.delete();
        assert_eq!(input.text(), "ñ");
        // Nothing to delete past the end
        input.end();
        input.delete();
        assert_eq!(input.text(), "ñ");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut input = typed("ab");
        input.move_right();
        input.insert('c');
        assert_eq!(input.text(), "abc");
        input.home();
        input.move_left();
        input.backspace();
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn test_clear() {
        let mut input = typed("task");
        input.clear();
        assert_eq!(input.text(), "");
        assert_eq!(input.split_at_cursor(), ("", ""));
    }
}
