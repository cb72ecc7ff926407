use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Trimmed, non-empty text ready for the simulator.
    Submitted(String),
    Edited,
    Ignored,
}

/// Line editor behind the prompt. Knows nothing about the transcript; the
/// caller passes in whether a response is in flight.
#[derive(Debug, Default)]
pub struct InputController {
    buffer: String,
    // in chars, not bytes
    cursor: usize,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether a submit right now would be accepted.
    pub fn can_submit(&self, disabled: bool) -> bool {
        !disabled && !self.buffer.trim().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent, disabled: bool) -> InputOutcome {
        if disabled {
            return InputOutcome::Ignored;
        }

        match key.code {
            KeyCode::Enter
                if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.insert('\n');
                InputOutcome::Edited
            }
            KeyCode::Enter => match self.submit(disabled) {
                Some(text) => InputOutcome::Submitted(text),
                None => InputOutcome::Ignored,
            },
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                InputOutcome::Edited
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputOutcome::Ignored
            }
            KeyCode::Char(c) => {
                self.insert(c);
                InputOutcome::Edited
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return InputOutcome::Ignored;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.buffer.remove(at);
                InputOutcome::Edited
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_count() {
                    return InputOutcome::Ignored;
                }
                let at = self.byte_index(self.cursor);
                self.buffer.remove(at);
                InputOutcome::Edited
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputOutcome::Edited
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                InputOutcome::Edited
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputOutcome::Edited
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Takes the trimmed buffer if it is non-empty and we are enabled.
    /// On rejection the buffer is left untouched.
    pub fn submit(&mut self, disabled: bool) -> Option<String> {
        if !self.can_submit(disabled) {
            return None;
        }
        let text = self.buffer.trim().to_string();
        self.clear();
        Some(text)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut InputController, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c)), false);
        }
    }

    #[test]
    fn test_enter_submits_trimmed_text() {
        let mut input = InputController::new();
        type_str(&mut input, "  status  ");

        let outcome = input.handle_key(key(KeyCode::Enter), false);

        assert_eq!(outcome, InputOutcome::Submitted("status".to_string()));
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let mut input = InputController::new();
        type_str(&mut input, "   ");

        assert_eq!(input.handle_key(key(KeyCode::Enter), false), InputOutcome::Ignored);
        assert_eq!(input.text(), "   ");
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut input = InputController::new();
        type_str(&mut input, "hello");

        assert_eq!(input.handle_key(key(KeyCode::Char('x')), true), InputOutcome::Ignored);
        assert_eq!(input.handle_key(key(KeyCode::Enter), true), InputOutcome::Ignored);
        assert_eq!(input.submit(true), None);
        assert_eq!(input.text(), "hello");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut input = InputController::new();
        type_str(&mut input, "a");
        input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT), false);
        type_str(&mut input, "b");

        assert_eq!(input.text(), "a\nb");
        assert_eq!(input.submit(false), Some("a\nb".to_string()));
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let mut input = InputController::new();
        type_str(&mut input, "a");
        let outcome = input.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT), false);
        type_str(&mut input, "b");

        assert_eq!(outcome, InputOutcome::Edited);
        assert_eq!(input.text(), "a\nb");
    }

    #[test]
    fn test_cursor_editing_is_char_based() {
        let mut input = InputController::new();
        type_str(&mut input, "ｱbc");
        input.handle_key(key(KeyCode::Home), false);
        input.handle_key(key(KeyCode::Right), false);
        input.handle_key(key(KeyCode::Backspace), false);
        assert_eq!(input.text(), "bc");

        input.handle_key(key(KeyCode::End), false);
        type_str(&mut input, "ﾝ");
        assert_eq!(input.text(), "bcﾝ");
        assert_eq!(input.char_count(), 3);

        input.handle_key(key(KeyCode::Left), false);
        input.handle_key(key(KeyCode::Delete), false);
        assert_eq!(input.text(), "bc");
    }

    #[test]
    fn test_ctrl_u_clears_and_ctrl_chars_do_not_insert() {
        let mut input = InputController::new();
        type_str(&mut input, "abc");

        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl('d'), false), InputOutcome::Ignored);
        assert_eq!(input.text(), "abc");

        input.handle_key(ctrl('u'), false);
        assert!(input.is_empty());
    }
}
