//! Login screen

use super::field_renderer::{draw_field, draw_form_message, submit_label, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FormState, SubmitForm, View};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_card;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_login(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Login(form) = &app.state.form else {
        return;
    };

    let card = centered_card(area, 56, 2 * FIELD_HEIGHT + BUTTON_HEIGHT + 6);
    let block = Block::default()
        .title(format!(" {} ", View::Login.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Message
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Signup link
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_form_message(frame, chunks[0], form.message.as_ref());
    draw_field(frame, chunks[1], &form.email, form.active_field_index == 0, true);
    draw_field(frame, chunks[2], &form.password, form.active_field_index == 1, true);

    let in_flight = form.guard.is_in_flight();
    render_button(
        frame,
        chunks[3],
        submit_label(form.guard.state(), "Login"),
        false,
        form.is_submittable() && !in_flight,
        Some(Color::Green),
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Don't have an account? ", Style::default().fg(Color::Gray)),
            Span::styled("Ctrl+N", Style::default().fg(Color::Cyan)),
            Span::styled(" to sign up", Style::default().fg(Color::Gray)),
        ])),
        chunks[4],
    );
}
