use super::App;
use crate::core::ask_service::{AskOutcome, AskParams};
use crate::ui::renderer::max_scroll_offset;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Debug)]
pub enum AppAction {
    InsertChar { c: char },
    InsertIntoInput { text: String },
    Backspace,
    SelectExample { index: usize },
    SelectNextExample,
    SelectPreviousExample,
    SubmitQuestion,
    AskResolved { request_id: u64, outcome: AskOutcome },
    ScrollUp { lines: u16 },
    ScrollDown { lines: u16 },
    PageUp,
    PageDown,
    Quit,
}

#[derive(Debug)]
pub enum AppCommand {
    SpawnAsk(AskParams),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    let command = dispatch_action(app, action, ctx);
    app.process_session_events();
    command
}

fn dispatch_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::InsertChar { c } => {
            if !app.session.in_flight() {
                app.session.edit_input(|input| input.insert_char(c));
            }
            None
        }
        AppAction::InsertIntoInput { text } => {
            if !app.session.in_flight() {
                app.session.edit_input(|input| input.insert_str(&text));
            }
            None
        }
        AppAction::Backspace => {
            if !app.session.in_flight() {
                app.session.edit_input(|input| input.backspace());
            }
            None
        }
        AppAction::SelectExample { index } => {
            app.select_example(index);
            None
        }
        AppAction::SelectNextExample => {
            app.select_next_example();
            None
        }
        AppAction::SelectPreviousExample => {
            app.select_previous_example();
            None
        }
        AppAction::SubmitQuestion => app.session.submit().map(AppCommand::SpawnAsk),
        AppAction::AskResolved {
            request_id,
            outcome,
        } => {
            resolve_ask(app, request_id, outcome);
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            let max_offset = max_scroll_offset(app, ctx.term_width, ctx.term_height);
            app.ui.scroll_down(lines, max_offset);
            None
        }
        AppAction::PageUp => {
            app.ui.scroll_up(page_size(ctx));
            None
        }
        AppAction::PageDown => {
            let max_offset = max_scroll_offset(app, ctx.term_width, ctx.term_height);
            app.ui.scroll_down(page_size(ctx), max_offset);
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
    }
}

fn resolve_ask(app: &mut App, request_id: u64, outcome: AskOutcome) {
    match outcome {
        AskOutcome::Answered(answer) => {
            app.session.request_succeeded(request_id, answer);
        }
        AskOutcome::Failed(error) => {
            app.session.request_failed(request_id, &error);
        }
    }
}

// Input box plus borders and the status line.
const RESERVED_ROWS: u16 = 7;

fn page_size(ctx: AppActionContext) -> u16 {
    ctx.term_height.saturating_sub(RESERVED_ROWS).max(1)
}
