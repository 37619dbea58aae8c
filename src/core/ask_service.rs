use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{AskRequest, AskResponse};
use crate::core::message::{Answer, Question};

/// Why a dispatch produced no answer. Only ever shown to the diagnostic log;
/// the session collapses every variant into one user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The service could not be reached, or its reply could not be read.
    Network(String),
    /// The service answered with a non-success status.
    Service { status: u16, body: String },
}

impl DispatchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DispatchError::Network(_) => None,
            DispatchError::Service { status, .. } => Some(*status),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Network(cause) => write!(f, "network error: {cause}"),
            DispatchError::Service { status, body } if body.is_empty() => {
                write!(f, "service error: HTTP {status}")
            }
            DispatchError::Service { status, body } => {
                write!(f, "service error: HTTP {status}: {body}")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Anything that can turn a question into an answer.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn dispatch(&self, question: &Question) -> Result<Answer, DispatchError>;
}

/// The production answerer: a JSON `POST` to the configured endpoint.
#[derive(Clone)]
pub struct HttpAnswerService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnswerService {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::Network(err.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

// Bodies are only kept for the diagnostic log; cap what we hold on to.
const MAX_ERROR_BODY_CHARS: usize = 512;

fn summarize_error_body(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_BODY_CHARS {
        let mut truncated: String = collapsed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        truncated.push('…');
        truncated
    } else {
        collapsed
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn dispatch(&self, question: &Question) -> Result<Answer, DispatchError> {
        let request = AskRequest {
            question: question.as_str().to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| DispatchError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(DispatchError::Service {
                status: status.as_u16(),
                body: summarize_error_body(&body),
            });
        }

        let payload: AskResponse = response
            .json()
            .await
            .map_err(|err| DispatchError::Network(format!("unreadable response: {err}")))?;

        Ok(Answer::new(payload.answer))
    }
}

#[derive(Clone, Debug)]
pub enum AskOutcome {
    Answered(Answer),
    Failed(DispatchError),
}

#[derive(Clone, Debug)]
pub struct AskParams {
    pub request_id: u64,
    pub question: Question,
}

/// Runs dispatches off the event loop and reports each outcome, tagged with
/// its request id, on a single channel.
#[derive(Clone)]
pub struct AskService {
    tx: mpsc::UnboundedSender<(AskOutcome, u64)>,
    answerer: Arc<dyn AnswerService>,
}

impl AskService {
    pub fn new(
        answerer: Arc<dyn AnswerService>,
    ) -> (Self, mpsc::UnboundedReceiver<(AskOutcome, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, answerer }, rx)
    }

    pub fn spawn_ask(&self, params: AskParams) {
        let tx = self.tx.clone();
        let answerer = Arc::clone(&self.answerer);
        tokio::spawn(async move {
            let AskParams {
                request_id,
                question,
            } = params;

            debug!(request_id, question = %question, "Dispatching question");
            let outcome = match answerer.dispatch(&question).await {
                Ok(answer) => {
                    debug!(request_id, answer_len = answer.as_str().len(), "Answer received");
                    AskOutcome::Answered(answer)
                }
                Err(err) => {
                    warn!(request_id, status = ?err.status(), error = %err, "Dispatch failed");
                    AskOutcome::Failed(err)
                }
            };
            let _ = tx.send((outcome, request_id));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{spawn_mock_server, MockResponse, ScriptedAnswerService};

    fn question(text: &str) -> Question {
        Question::parse(text).expect("valid question")
    }

    #[tokio::test]
    async fn http_dispatch_posts_question_and_returns_answer_verbatim() {
        let server = spawn_mock_server(vec![MockResponse::json(
            200,
            r#"{"answer":"  Transformers use attention.\n\n- point  "}"#,
        )])
        .await;
        let service = HttpAnswerService::new(server.url("/ask"), None).expect("client");

        let answer = service
            .dispatch(&question("  What is attention?  "))
            .await
            .expect("answer");

        assert_eq!(answer.as_str(), "  Transformers use attention.\n\n- point  ");
        let requests = server.captured().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].request_line.starts_with("POST /ask "));
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).expect("json");
        assert_eq!(body, serde_json::json!({ "question": "What is attention?" }));
        assert!(requests[0]
            .header("content-type")
            .is_some_and(|value| value.starts_with("application/json")));
    }

    #[tokio::test]
    async fn http_dispatch_maps_non_success_status_to_service_error() {
        let server = spawn_mock_server(vec![MockResponse::json(
            500,
            r#"{"detail":"Internal   Server Error"}"#,
        )])
        .await;
        let service = HttpAnswerService::new(server.url("/ask"), None).expect("client");

        let err = service.dispatch(&question("Q")).await.unwrap_err();
        assert_eq!(
            err,
            DispatchError::Service {
                status: 500,
                body: r#"{"detail":"Internal Server Error"}"#.to_string(),
            }
        );
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn http_dispatch_treats_malformed_payload_as_network_error() {
        let server = spawn_mock_server(vec![MockResponse::json(200, r#"{"result":"nope"}"#)]).await;
        let service = HttpAnswerService::new(server.url("/ask"), None).expect("client");

        let err = service.dispatch(&question("Q")).await.unwrap_err();
        assert!(matches!(err, DispatchError::Network(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn http_dispatch_reports_unreachable_service_as_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let service =
            HttpAnswerService::new(format!("http://{addr}/ask"), None).expect("client");
        let err = service.dispatch(&question("Q")).await.unwrap_err();
        assert!(matches!(err, DispatchError::Network(_)));
    }

    #[tokio::test]
    async fn spawn_ask_reports_outcome_with_request_id() {
        let scripted = ScriptedAnswerService::new(vec![
            Ok(Answer::new("A1")),
            Err(DispatchError::Service {
                status: 503,
                body: String::new(),
            }),
        ]);
        let (service, mut rx) = AskService::new(Arc::new(scripted.clone()));

        service.spawn_ask(AskParams {
            request_id: 7,
            question: question("Q1"),
        });
        let (outcome, id) = rx.recv().await.expect("first outcome");
        assert_eq!(id, 7);
        assert!(matches!(outcome, AskOutcome::Answered(ref a) if a.as_str() == "A1"));

        service.spawn_ask(AskParams {
            request_id: 8,
            question: question("Q2"),
        });
        let (outcome, id) = rx.recv().await.expect("second outcome");
        assert_eq!(id, 8);
        assert!(matches!(outcome, AskOutcome::Failed(ref e) if e.status() == Some(503)));

        assert_eq!(scripted.questions(), vec!["Q1".to_string(), "Q2".to_string()]);
    }

    #[test]
    fn error_body_summary_collapses_and_truncates() {
        assert_eq!(summarize_error_body("a \n b\t c"), "a b c");
        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let summary = summarize_error_body(&long);
        assert_eq!(summary.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn display_includes_cause() {
        let network = DispatchError::Network("connection refused".into());
        assert_eq!(network.to_string(), "network error: connection refused");
        let service = DispatchError::Service {
            status: 404,
            body: String::new(),
        };
        assert_eq!(service.to_string(), "service error: HTTP 404");
    }
}
