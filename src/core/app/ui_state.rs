use std::time::Instant;

/// Presentation-only state. Nothing here feeds back into the session.
pub struct UiState {
    pub scroll_offset: u16,
    pub example_cursor: Option<usize>,
    pub exit_requested: bool,
    pub pulse_start: Instant,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            example_cursor: None,
            exit_requested: false,
            pulse_start: Instant::now(),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Scrolls towards the end, never past `max_offset`.
    pub fn scroll_down(&mut self, lines: u16, max_offset: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_offset);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn restart_pulse(&mut self) {
        self.pulse_start = Instant::now();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_down_stops_at_max_offset() {
        let mut ui = UiState::new();
        ui.scroll_down(5, 3);
        assert_eq!(ui.scroll_offset, 3);
        ui.scroll_up(1);
        assert_eq!(ui.scroll_offset, 2);
        ui.scroll_down(1, 0);
        assert_eq!(ui.scroll_offset, 0);
    }
}
