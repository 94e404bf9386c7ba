//! Layout components (content area, centered card, status bar)

use crate::app::App;
use crate::state::{FormState, MessageKind, View};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Center a card of at most `width` x `height` inside `area`
pub fn centered_card(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    card
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Session status
    let session_status = if app.session().is_authenticated() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(session_status);

    // View-specific hints
    let hints = get_view_hints(&app.state.current_view, &app.state.form);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    // Toast
    if let Some(toast) = &app.state.toast {
        let color = match toast.kind {
            MessageKind::Success => Color::Green,
            MessageKind::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(&toast.text, Style::default().fg(color)));
    }

    // Signed-in user
    if let Some(user) = app.session().user() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            user.email.as_str(),
            Style::default().fg(Color::Blue),
        ));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View, form: &FormState) -> &'static str {
    match (view, form) {
        (_, FormState::Profile(f)) if f.confirm_delete => "y:delete  n/Esc:cancel",
        (_, FormState::Profile(f)) if f.is_editing => "Tab:next  ^S:update  Esc:cancel",
        (View::Profile, _) => "←/→:select  Enter:press  e:edit  Esc:back",
        (View::Login, _) => "Tab:next  Enter:login  ^N:sign up",
        (View::Signup, _) => "Tab:next  Enter:sign up  Esc:login",
        (View::Home, _) => "p:profile  l:logout  q:quit",
    }
}
