//! Profile ("User Info") screen

use super::field_renderer::{draw_field, draw_form_message, submit_label, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FormState, ProfileButton, ProfileForm, SubmitForm, View};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_card;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

pub fn draw_profile(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Profile(form) = &app.state.form else {
        return;
    };

    let card = centered_card(area, 64, 2 * FIELD_HEIGHT + BUTTON_HEIGHT + 4);
    let border_color = if form.is_editing {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let title = if form.is_editing {
        format!(" {} (editing) ", View::Profile.title())
    } else {
        format!(" {} ", View::Profile.title())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Message
            Constraint::Length(FIELD_HEIGHT),  // Name
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    draw_form_message(frame, chunks[0], form.message.as_ref());
    draw_field(
        frame,
        chunks[1],
        &form.name,
        form.active_field_index == 0,
        form.is_editing,
    );
    draw_field(
        frame,
        chunks[2],
        &form.email,
        form.active_field_index == 1,
        form.is_editing,
    );

    draw_buttons(frame, chunks[3], form);
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &ProfileForm) {
    let button_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let busy = form.is_busy();
    let row_active = form.is_buttons_row_active();

    for (idx, button) in ProfileButton::ALL.into_iter().enumerate() {
        let (label, enabled, accent) = match button {
            ProfileButton::Primary if form.is_editing => (
                submit_label(form.guard.state(), "Update"),
                form.is_submittable() && !busy,
                Some(Color::Green),
            ),
            ProfileButton::Primary => ("Edit", !busy, None),
            ProfileButton::Logout => ("Logout", !busy, None),
            ProfileButton::DeleteAccount => (
                submit_label(form.delete_guard.state(), "Delete account"),
                !busy,
                Some(Color::Red),
            ),
        };
        render_button(
            frame,
            button_chunks[idx],
            label,
            row_active && form.selected_button == button,
            enabled,
            accent,
        );
    }
}
