//! Signup screen

use super::field_renderer::{draw_field, draw_form_message, submit_label, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{Form, FormState, SubmitForm, View};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_card;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_signup(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Signup(form) = &app.state.form else {
        return;
    };

    let card = centered_card(area, 56, 3 * FIELD_HEIGHT + BUTTON_HEIGHT + 6);
    let block = Block::default()
        .title(format!(" {} ", View::Signup.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Message
            Constraint::Length(FIELD_HEIGHT),  // Name
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Login link
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_form_message(frame, chunks[0], form.message.as_ref());
    for idx in 0..form.field_count() {
        if let Some(field) = form.get_field(idx) {
            draw_field(frame, chunks[idx + 1], field, form.active_field() == idx, true);
        }
    }

    render_button(
        frame,
        chunks[4],
        submit_label(form.guard.state(), "Sign up"),
        false,
        form.is_submittable() && !form.guard.is_in_flight(),
        Some(Color::Green),
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Already have an account? ", Style::default().fg(Color::Gray)),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::styled(" to log in", Style::default().fg(Color::Gray)),
        ])),
        chunks[5],
    );
}
