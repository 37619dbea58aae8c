use unicode_segmentation::UnicodeSegmentation;

use crate::core::message::Question;
use crate::utils::input::sanitize_text_input;

/// Text the user is composing.
///
/// Edits are stored verbatim; trimming happens only on [`commit`](Self::commit).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The trimmed question, or `None` when there is nothing to send.
    pub fn commit(&self) -> Option<Question> {
        Question::parse(&self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn insert_char(&mut self, c: char) {
        match c {
            '\n' => self.text.push('\n'),
            '\t' => self.text.push_str("    "),
            _ if c.is_control() => {}
            _ => self.text.push(c),
        }
    }

    pub fn insert_str(&mut self, text: &str) {
        self.text.push_str(&sanitize_text_input(text));
    }

    /// Removes the last grapheme cluster.
    pub fn backspace(&mut self) {
        if let Some((index, _)) = self.text.grapheme_indices(true).next_back() {
            self.text.truncate(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_is_verbatim() {
        let mut buffer = InputBuffer::new();
        buffer.set_text("  padded question  ");
        assert_eq!(buffer.text(), "  padded question  ");
    }

    #[test]
    fn commit_trims_without_mutating() {
        let mut buffer = InputBuffer::new();
        buffer.set_text("  What is drift?\n");
        let question = buffer.commit().expect("question");
        assert_eq!(question.as_str(), "What is drift?");
        assert_eq!(buffer.text(), "  What is drift?\n");
    }

    #[test]
    fn commit_of_blank_buffer_is_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.commit().is_none());
        buffer.set_text(" \t\n ");
        assert!(buffer.commit().is_none());
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.set_text("draft");
        buffer.clear();
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut buffer = InputBuffer::new();
        buffer.set_text("cafe\u{301}");
        buffer.backspace();
        assert_eq!(buffer.text(), "caf");

        buffer.set_text("👍🏽");
        buffer.backspace();
        assert_eq!(buffer.text(), "");

        buffer.backspace();
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn insert_helpers_filter_control_characters() {
        let mut buffer = InputBuffer::new();
        buffer.insert_char('a');
        buffer.insert_char('\x07');
        buffer.insert_char('\n');
        buffer.insert_str("b\r\nc\td");
        assert_eq!(buffer.text(), "a\nb\nc    d");
    }
}
