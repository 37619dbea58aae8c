//! Maps terminal key events onto app actions.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::AppAction;

/// Returns the action for `key`, or `None` when the key is unbound.
pub fn map_key(key: &KeyEvent) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => Some(AppAction::Quit),
        KeyCode::Char('n') if ctrl => Some(AppAction::SelectNextExample),
        KeyCode::Char('p') if ctrl => Some(AppAction::SelectPreviousExample),
        KeyCode::Char('j') if ctrl => Some(AppAction::InsertChar { c: '\n' }),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(AppAction::InsertChar { c }),
        KeyCode::Tab => Some(AppAction::InsertChar { c: '\t' }),
        KeyCode::Enter if alt => Some(AppAction::InsertChar { c: '\n' }),
        KeyCode::Enter => Some(AppAction::SubmitQuestion),
        KeyCode::Backspace => Some(AppAction::Backspace),
        KeyCode::Up => Some(AppAction::ScrollUp { lines: 1 }),
        KeyCode::Down => Some(AppAction::ScrollDown { lines: 1 }),
        KeyCode::PageUp => Some(AppAction::PageUp),
        KeyCode::PageDown => Some(AppAction::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn enter_submits_and_alt_enter_breaks_line() {
        assert!(matches!(
            map_key(&key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppAction::SubmitQuestion)
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(AppAction::InsertChar { c: '\n' })
        ));
    }

    #[test]
    fn control_chords_do_not_type() {
        assert!(matches!(
            map_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(AppAction::SelectNextExample)
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            Some(AppAction::SelectPreviousExample)
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(AppAction::InsertChar { c: '\n' })
        ));
        assert!(map_key(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)).is_none());
    }

    #[test]
    fn plain_and_shifted_characters_are_inserted() {
        assert!(matches!(
            map_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(AppAction::InsertChar { c: 'q' })
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(AppAction::InsertChar { c: 'Q' })
        ));
    }

    #[test]
    fn navigation_keys_scroll() {
        assert!(matches!(
            map_key(&key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(AppAction::PageDown)
        ));
        assert!(matches!(
            map_key(&key(KeyCode::Up, KeyModifiers::NONE)),
            Some(AppAction::ScrollUp { lines: 1 })
        ));
        assert!(map_key(&key(KeyCode::Esc, KeyModifiers::NONE)).is_none());
    }
}
