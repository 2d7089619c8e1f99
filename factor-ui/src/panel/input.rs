//! Single-line editor for the panel's input box.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable text with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters from the start of the line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(
        &self,
        char_index: usize,
    ) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    pub fn insert(
        &mut self,
        c: char,
    ) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Returns the text and leaves the line empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Applies an editing key. Returns `false` for keys it does not handle.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
    ) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn typed(text: &str) -> InputLine {
        let mut input = InputLine::new();
        for c in text.chars() {
            input.insert(c);
        }
        input
    }

    fn press(
        input: &mut InputLine,
        code: KeyCode,
    ) -> bool {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = typed("A_P(5, 10)");
        input.home();
        for _ in 0..5 {
            input.move_right();
        }

        input.insert('%');

        assert_eq!(input.text(), "A_P(5%, 10)");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = typed("x = 12");
        input.backspace();
        assert_eq!(input.text(), "x = 1");

        input.home();
        input.delete();
        assert_eq!(input.text(), " = 1");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn editing_at_the_edges_is_a_no_op() {
        let mut input = typed("ab");
        input.delete();
        input.home();
        input.backspace();
        input.move_left();

        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn cursor_counts_characters_not_bytes() {
        let mut input = typed("é1");
        input.move_left();

        input.backspace();

        assert_eq!(input.text(), "1");
    }

    #[test]
    fn take_empties_the_line() {
        let mut input = typed("1 + 1");

        let text = input.take();

        assert_eq!(text, "1 + 1");
        assert_eq!(input, InputLine::new());
    }

    #[test]
    fn handle_key_maps_editing_keys() {
        let mut input = InputLine::new();

        assert!(press(&mut input, KeyCode::Char('7')));
        assert!(press(&mut input, KeyCode::Home));
        assert!(press(&mut input, KeyCode::Char('-')));
        assert!(press(&mut input, KeyCode::End));
        assert!(!press(&mut input, KeyCode::Enter));
        assert!(!press(&mut input, KeyCode::Up));

        assert_eq!(input.text(), "-7");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn control_characters_are_not_inserted() {
        let mut input = InputLine::new();

        let handled = input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(!handled);
        assert_eq!(input.text(), "");
    }
}
