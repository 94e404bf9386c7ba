//! Confirmation dialog for deleting the account

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Style},
    text::Span,
    Frame,
};

const DELETE_WARNING: &str = "Are you sure you want to delete your account?\n\
    Your account and all of your todos will be removed permanently.";

/// Render the account deletion confirmation
pub fn render_confirm_dialog(frame: &mut Frame) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Delete account",
            title_color: Color::Red,
            border_color: Color::Red,
            message: DELETE_WARNING,
            hint: Some(vec![
                Span::styled("y", Style::default().fg(Color::Cyan)),
                Span::styled(" delete  ", Style::default().fg(Color::DarkGray)),
                Span::styled("n/Esc", Style::default().fg(Color::Cyan)),
                Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
            ]),
            max_width: 56,
        },
    );
}
