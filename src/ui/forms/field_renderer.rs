//! Field rendering utilities for forms

use crate::state::{FormField, FormMessage, MessageKind, SubmissionState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a field: bordered input plus its message line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its validation message underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    is_enabled: bool,
) {
    let [input_area, message_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

    let has_error = field.message().is_some();
    let border_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let value_style = if is_enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(field.display_value(), value_style)];
    if is_active && is_enabled {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

    if let Some(message) = field.message() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {message}"),
                Style::default().fg(Color::Red),
            )),
            message_area,
        );
    }
}

/// Draw the inline message shown above a form
pub fn draw_form_message(frame: &mut Frame, area: Rect, message: Option<&FormMessage>) {
    let Some(message) = message else {
        return;
    };
    let color = match message.kind {
        MessageKind::Success => Color::Green,
        MessageKind::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            message.text.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        area,
    );
}

/// Label of a submit button for the guard's state
pub fn submit_label(state: SubmissionState, label: &'static str) -> &'static str {
    match state {
        SubmissionState::InFlight => "Please wait…",
        SubmissionState::Idle | SubmissionState::Settled => label,
    }
}
