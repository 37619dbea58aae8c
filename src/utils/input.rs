//! Input utilities for terminal text entry

/// Sanitize pasted or typed text so it cannot corrupt the TUI
///
/// - Tabs become 4 spaces
/// - `\r\n` and lone `\r` become `\n`
/// - Any other control character is dropped
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                sanitized.push('\n');
            }
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}
