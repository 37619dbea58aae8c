use std::collections::VecDeque;

use crate::core::message::QaPair;

/// Read-only projection of the newest-first history.
#[derive(Clone, Copy)]
pub struct HistoryView<'a> {
    history: &'a VecDeque<QaPair>,
}

impl<'a> HistoryView<'a> {
    pub fn new(history: &'a VecDeque<QaPair>) -> Self {
        Self { history }
    }

    /// The most recent exchange.
    pub fn current(&self) -> Option<&'a QaPair> {
        self.history.front()
    }

    /// Every exchange but the most recent, newest first. Empty until there
    /// are at least two, so a lone exchange is never shown twice.
    pub fn previous(&self) -> Vec<&'a QaPair> {
        self.history.iter().skip(1).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.history.len() > 1
    }

    /// Example questions are only offered before the first answer.
    pub fn show_examples(&self) -> bool {
        self.history.is_empty()
    }
}
