//! One-shot `ragask ask` without the TUI.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::core::ask_service::{AnswerService, AskOutcome, AskService, HttpAnswerService};
use crate::core::app::SessionState;
use crate::core::message::QaPair;
use crate::utils::logging::LoggingState;

/// Runs a single question through a fresh session.
///
/// `Err` carries the message a user should see: the session's generic
/// failure message, or a note that the question was blank.
pub async fn ask_with(
    answerer: Arc<dyn AnswerService>,
    endpoint: &str,
    text: &str,
) -> Result<QaPair, String> {
    let mut session = SessionState::create(endpoint);
    session.set_text(text);
    let Some(params) = session.submit() else {
        session.dispose();
        return Err("Nothing to ask: the question is blank".to_string());
    };

    let (service, mut outcomes) = AskService::new(answerer);
    service.spawn_ask(params);

    let result = match outcomes.recv().await {
        Some((AskOutcome::Answered(answer), request_id)) => {
            session.request_succeeded(request_id, answer);
            session
                .history_view()
                .current()
                .cloned()
                .ok_or_else(|| "No answer was recorded".to_string())
        }
        Some((AskOutcome::Failed(err), request_id)) => {
            session.request_failed(request_id, &err);
            Err(session.last_error().unwrap_or_default().to_string())
        }
        None => Err("The request was dropped before it finished".to_string()),
    };

    session.dispose();
    result
}

pub async fn run_ask(
    endpoint: String,
    request_timeout: Option<Duration>,
    question: &str,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let logging = LoggingState::new(log_file)?;
    let answerer = HttpAnswerService::new(endpoint.clone(), request_timeout)?;

    match ask_with(Arc::new(answerer), &endpoint, question).await {
        Ok(pair) => {
            println!("{}", pair.answer());
            if logging.is_active() {
                logging.log_exchange(&pair)?;
            }
            info!(endpoint = %endpoint, "Question answered");
            Ok(())
        }
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
}
