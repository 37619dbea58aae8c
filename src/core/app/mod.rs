//! Application state for a ragask session.
//!
//! [`App`] bundles the authoritative [`SessionState`] with presentation state
//! and the example-question list. All mutation from the event loop goes
//! through [`apply_action`], which returns an [`AppCommand`] when a request
//! has to be dispatched.

pub mod actions;
pub mod history;
pub mod input;
pub mod session;
pub mod ui_state;


pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionEnvelope, AppCommand,
};
pub use history::HistoryView;
pub use input::InputBuffer;
pub use session::{SessionEvent, SessionPhase, SessionState};
pub use ui_state::UiState;

use tokio::sync::mpsc;
use tracing::warn;

use crate::utils::logging::LoggingState;

pub struct AppInitConfig {
    pub endpoint: String,
    pub examples: Vec<String>,
    pub log_file: Option<String>,
}

pub struct App {
    pub endpoint: String,
    pub session: SessionState,
    pub ui: UiState,
    pub examples: Vec<String>,
    pub logging: LoggingState,
    session_events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl App {
    pub fn new(init: AppInitConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let AppInitConfig {
            endpoint,
            examples,
            log_file,
        } = init;

        let logging = LoggingState::new(log_file)?;
        if let Err(err) = logging.log_session_start() {
            warn!(error = %err, "Could not write transcript header");
        }

        let mut session = SessionState::create(&endpoint);
        let session_events = session.subscribe();

        Ok(Self {
            session,
            endpoint,
            ui: UiState::new(),
            examples,
            logging,
            session_events,
        })
    }

    /// Drains pending session notifications and applies their presentation
    /// side effects: the pulse restarts on submit, and a completed exchange
    /// is written to the transcript and brought into view.
    pub fn process_session_events(&mut self) {
        while let Ok(event) = self.session_events.try_recv() {
            match event {
                SessionEvent::Submitted { .. } => self.ui.restart_pulse(),
                SessionEvent::Succeeded { pair, .. } => {
                    self.ui.example_cursor = None;
                    self.ui.scroll_to_top();
                    if let Err(err) = self.logging.log_exchange(&pair) {
                        warn!(error = %err, "Could not append exchange to transcript");
                    }
                }
                SessionEvent::InputChanged
                | SessionEvent::Failed { .. }
                | SessionEvent::Disposed => {}
            }
        }
    }

    /// Loads example `index` into the input. Submission is left to the user.
    /// Ignored while a request is in flight or once history exists.
    pub fn select_example(&mut self, index: usize) -> bool {
        if self.session.in_flight() || !self.session.history_view().show_examples() {
            return false;
        }
        let Some(example) = self.examples.get(index) else {
            return false;
        };
        let example = example.clone();
        self.session.set_text(example);
        self.ui.example_cursor = Some(index);
        true
    }

    pub fn select_next_example(&mut self) -> bool {
        if self.examples.is_empty() {
            return false;
        }
        let next = match self.ui.example_cursor {
            Some(current) => (current + 1) % self.examples.len(),
            None => 0,
        };
        self.select_example(next)
    }

    pub fn select_previous_example(&mut self) -> bool {
        if self.examples.is_empty() {
            return false;
        }
        let last = self.examples.len() - 1;
        let previous = match self.ui.example_cursor {
            Some(0) | None => last,
            Some(current) => current - 1,
        };
        self.select_example(previous)
    }

    pub fn dispose(self) {
        self.session.dispose();
    }
}
