use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::{App, SessionPhase};
use crate::core::message::QaPair;
use crate::utils::url::endpoint_authority;

const MAX_INPUT_ROWS: u16 = 6;

/// Builds the scrollable body: example questions before the first answer,
/// then the current answer and any earlier exchanges.
pub fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let view = app.session.history_view();

    if view.show_examples() && !app.examples.is_empty() {
        lines.push(heading("Example questions"));
        for (index, example) in app.examples.iter().enumerate() {
            let selected = app.ui.example_cursor == Some(index);
            let style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if selected { "▸ " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}{example}"),
                style,
            )));
        }
        lines.push(Line::from(Span::styled(
            "Ctrl+N / Ctrl+P to load an example",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
    }

    if let Some(current) = view.current() {
        lines.push(heading("Answer"));
        push_exchange(&mut lines, current);
    }

    if view.has_previous() {
        lines.push(heading("Previous Questions"));
        for pair in view.previous() {
            push_exchange(&mut lines, pair);
        }
    }

    lines
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn push_exchange(lines: &mut Vec<Line<'static>>, pair: &QaPair) {
    lines.push(Line::from(vec![
        Span::styled("Q: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            pair.question().as_str().to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ]));
    // The answer is shown verbatim, one display line per source line.
    for line in pair.answer().as_str().split('\n') {
        lines.push(Line::from(line.to_string()));
    }
    lines.push(Line::default());
}

fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    text.split('\n')
        .map(|line| UnicodeWidthStr::width(line).div_ceil(width).max(1))
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}

pub fn wrapped_line_count(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}

pub fn input_area_height(app: &App, term_width: u16) -> u16 {
    let inner_width = term_width.saturating_sub(2);
    wrapped_height(app.session.input_text(), inner_width).clamp(1, MAX_INPUT_ROWS)
}

fn error_area_height(app: &App) -> u16 {
    u16::from(app.session.last_error().is_some())
}

/// Largest scroll offset that still leaves the body filled, for a terminal
/// of the given size.
pub fn max_scroll_offset(app: &App, term_width: u16, term_height: u16) -> u16 {
    let body_height = term_height
        .saturating_sub(input_area_height(app, term_width) + 2)
        .saturating_sub(error_area_height(app));
    // One row goes to the title.
    let available_height = body_height.saturating_sub(1);
    wrapped_line_count(&build_display_lines(app), term_width).saturating_sub(available_height)
}

fn pulse_symbol(app: &App) -> &'static str {
    let elapsed = app.ui.pulse_start.elapsed().as_millis() as f32 / 1000.0;
    let phase = (elapsed * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

const MAX_TITLE_QUESTION_CHARS: usize = 40;

fn input_title(app: &App) -> String {
    if let SessionPhase::Submitting { question, .. } = app.session.phase() {
        let first_line = question.as_str().lines().next().unwrap_or_default();
        let mut shown: String = first_line.chars().take(MAX_TITLE_QUESTION_CHARS).collect();
        if shown.len() < question.as_str().len() {
            shown.push('…');
        }
        format!("Getting Answer... {} {shown}", pulse_symbol(app))
    } else if app.session.history_view().show_examples() {
        "Ask a question (Enter to send, Alt+Enter for new line, Ctrl+N/Ctrl+P for examples, Ctrl+C to quit)".to_string()
    } else {
        "Ask a question (Enter to send, Alt+Enter for new line, Ctrl+C to quit)".to_string()
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let input_height = input_area_height(app, f.area().width);
    let error_height = error_area_height(app);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(error_height),
            Constraint::Length(input_height + 2),
        ])
        .split(f.area());

    let lines = build_display_lines(app);
    let scroll_offset = app
        .ui
        .scroll_offset
        .min(max_scroll_offset(app, f.area().width, f.area().height));

    let title = format!(
        "ragask v{} - {} • Log: {}",
        env!("CARGO_PKG_VERSION"),
        endpoint_authority(&app.endpoint),
        app.logging.get_status_string()
    );

    let body = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));
    f.render_widget(body, chunks[0]);

    if let Some(error) = app.session.last_error() {
        let error_line = Paragraph::new(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        f.render_widget(error_line, chunks[1]);
    }

    let in_flight = app.session.in_flight();
    let input_style = if in_flight {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let input_text = app.session.input_text();
    let input_scroll =
        wrapped_height(input_text, chunks[2].width.saturating_sub(2)).saturating_sub(input_height);

    let input = Paragraph::new(input_text.to_string())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Reset))
                .title(input_title(app)),
        )
        .wrap(Wrap { trim: false })
        .scroll((input_scroll, 0));
    f.render_widget(input, chunks[2]);

    if !in_flight {
        let inner_width = usize::from(chunks[2].width.saturating_sub(2).max(1));
        let last_line = input_text.rsplit('\n').next().unwrap_or_default();
        let col = UnicodeWidthStr::width(last_line) % inner_width;
        let row = wrapped_height(input_text, chunks[2].width.saturating_sub(2))
            .saturating_sub(1)
            .saturating_sub(input_scroll);
        let cursor_x = (col as u16 + 1).min(chunks[2].width.saturating_sub(2));
        f.set_cursor_position((chunks[2].x + cursor_x, chunks[2].y + 1 + row));
    }
}
