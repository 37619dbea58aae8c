//! Interactive event loop.
//!
//! The loop owns the [`App`] outright: it draws a frame, collects key and
//! paste events plus any finished requests, applies them as actions, and
//! spawns the requests those actions ask for.

mod keybindings;
mod lifecycle;

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use self::keybindings::map_key;
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionEnvelope, AppCommand,
    AppInitConfig,
};
use crate::core::ask_service::{AskOutcome, AskService, HttpAnswerService};
use crate::ui::renderer::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn run_chat(
    init: AppInitConfig,
    request_timeout: Option<Duration>,
) -> Result<(), Box<dyn Error>> {
    let answerer = HttpAnswerService::new(init.endpoint.clone(), request_timeout)?;
    let (service, mut outcomes) = AskService::new(Arc::new(answerer));
    let mut app = App::new(init)?;
    info!(endpoint = %app.endpoint, "Starting interactive session");

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &service, &mut outcomes);
    restore_terminal(&mut terminal)?;

    info!(
        exchanges = app.session.history().len(),
        "Interactive session finished"
    );
    app.dispose();
    result
}

fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    service: &AskService,
    outcomes: &mut UnboundedReceiver<(AskOutcome, u64)>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let size = terminal.size()?;
        let context = AppActionContext {
            term_width: size.width,
            term_height: size.height,
        };
        let mut actions = Vec::new();

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    actions.extend(map_key(&key));
                }
                Event::Paste(text) => actions.push(AppAction::InsertIntoInput { text }),
                _ => {}
            }
        }

        while let Ok((outcome, request_id)) = outcomes.try_recv() {
            actions.push(AppAction::AskResolved {
                request_id,
                outcome,
            });
        }

        let envelopes = actions
            .into_iter()
            .map(|action| AppActionEnvelope { action, context });
        for command in apply_actions(app, envelopes) {
            match command {
                AppCommand::SpawnAsk(params) => service.spawn_ask(params),
            }
        }

        if app.ui.exit_requested {
            return Ok(());
        }
    }
}
