//! The question/answer session and its state machine.
//!
//! [`SessionState`] is the only writer of the session record. Every change
//! goes through one of the transitions below and is announced to
//! subscribers as a [`SessionEvent`]:
//!
//! | From       | Event               | To         |
//! |------------|---------------------|------------|
//! | Idle       | `submit` (valid)    | Submitting |
//! | Idle       | `submit` (blank)    | Idle       |
//! | Submitting | `submit`            | Submitting |
//! | Submitting | `request_succeeded` | Idle       |
//! | Submitting | `request_failed`    | Idle       |

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::debug;

use super::history::HistoryView;
use super::input::InputBuffer;
use crate::core::ask_service::{AskParams, DispatchError};
use crate::core::constants::failure_message;
use crate::core::message::{Answer, QaPair, Question};
use crate::utils::url::endpoint_authority;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Submitting { request_id: u64, question: Question },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    InputChanged,
    Submitted { request_id: u64, question: Question },
    Succeeded { request_id: u64, pair: QaPair },
    Failed { request_id: u64, message: String },
    Disposed,
}

pub struct SessionState {
    input: InputBuffer,
    phase: SessionPhase,
    last_error: Option<String>,
    current_answer: Option<Answer>,
    history: VecDeque<QaPair>,
    next_request_id: u64,
    failure_message: String,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl SessionState {
    /// Starts an empty session for the service at `endpoint`.
    pub fn create(endpoint: &str) -> Self {
        Self {
            input: InputBuffer::new(),
            phase: SessionPhase::Idle,
            last_error: None,
            current_answer: None,
            history: VecDeque::new(),
            next_request_id: 1,
            failure_message: failure_message(&endpoint_authority(endpoint)),
            subscribers: Vec::new(),
        }
    }

    /// Ends the session. Subscribers see [`SessionEvent::Disposed`] and then
    /// a closed channel.
    pub fn dispose(mut self) {
        debug!(exchanges = self.history.len(), "Disposing session");
        self.notify(SessionEvent::Disposed);
        self.subscribers.clear();
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitting { .. })
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.current_answer.as_ref()
    }

    pub fn history(&self) -> &VecDeque<QaPair> {
        &self.history
    }

    pub fn history_view(&self) -> HistoryView<'_> {
        HistoryView::new(&self.history)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
        self.notify(SessionEvent::InputChanged);
    }

    /// Applies an arbitrary buffer edit, notifying only if the text changed.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut InputBuffer)) {
        let before = self.input.text().to_string();
        edit(&mut self.input);
        if self.input.text() != before {
            self.notify(SessionEvent::InputChanged);
        }
    }

    /// Commits the input and moves to `Submitting`.
    ///
    /// Returns the request to dispatch, or `None` when the input is blank or
    /// a request is already outstanding. In both `None` cases nothing changes.
    pub fn submit(&mut self) -> Option<AskParams> {
        if self.in_flight() {
            debug!("Ignoring submit while a request is in flight");
            return None;
        }
        let question = self.input.commit()?;

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.last_error = None;
        self.phase = SessionPhase::Submitting {
            request_id,
            question: question.clone(),
        };
        debug!(request_id, "Session submitting");
        self.notify(SessionEvent::Submitted {
            request_id,
            question: question.clone(),
        });

        Some(AskParams {
            request_id,
            question,
        })
    }

    /// Resolves the outstanding request with an answer. Returns `false` (and
    /// changes nothing) if `request_id` is not the one in flight.
    pub fn request_succeeded(&mut self, request_id: u64, answer: Answer) -> bool {
        let Some(question) = self.take_pending(request_id) else {
            return false;
        };

        let pair = QaPair::new(question, answer.clone());
        self.current_answer = Some(answer);
        self.history.push_front(pair.clone());
        self.input.clear();
        debug!(request_id, exchanges = self.history.len(), "Session answered");
        self.notify(SessionEvent::Succeeded { request_id, pair });
        true
    }

    /// Resolves the outstanding request as failed. The cause is logged; the
    /// user only ever sees the session's generic failure message.
    pub fn request_failed(&mut self, request_id: u64, error: &DispatchError) -> bool {
        if self.take_pending(request_id).is_none() {
            return false;
        }

        debug!(request_id, error = %error, "Session request failed");
        let message = self.failure_message.clone();
        self.last_error = Some(message.clone());
        self.notify(SessionEvent::Failed {
            request_id,
            message,
        });
        true
    }

    fn take_pending(&mut self, request_id: u64) -> Option<Question> {
        match &self.phase {
            SessionPhase::Submitting {
                request_id: pending,
                ..
            } if *pending == request_id => {}
            SessionPhase::Submitting {
                request_id: pending,
                ..
            } => {
                debug!(request_id, pending, "Ignoring resolution for stale request");
                return None;
            }
            SessionPhase::Idle => {
                debug!(request_id, "Ignoring resolution while idle");
                return None;
            }
        }

        match std::mem::replace(&mut self.phase, SessionPhase::Idle) {
            SessionPhase::Submitting { question, .. } => Some(question),
            SessionPhase::Idle => None,
        }
    }
}
