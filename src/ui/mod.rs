//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;

use crate::app::App;
use crate::state::{FormState, View};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    // Draw main content based on current view
    match &app.state.current_view {
        View::Login => forms::draw_login(frame, main_area, app),
        View::Signup => forms::draw_signup(frame, main_area, app),
        View::Home => home::draw(frame, main_area, app),
        View::Profile => forms::draw_profile(frame, main_area, app),
    }

    // Modal on top of the profile screen
    if let FormState::Profile(form) = &app.state.form {
        if form.confirm_delete {
            components::render_confirm_dialog(frame);
        }
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);
}
