//! Home screen shown after login

use super::layout::centered_card;
use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let card = centered_card(area, 48, 8);

    let greeting = match app.session().user() {
        Some(user) => format!("Welcome, {}!", user.name),
        None => "Welcome!".to_string(),
    };

    let content = vec![
        Line::from(Span::styled(
            greeting,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("p", Style::default().fg(Color::Cyan)),
            Span::raw(" profile   "),
            Span::styled("l", Style::default().fg(Color::Cyan)),
            Span::raw(" logout   "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", View::Home.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .block(block),
        card,
    );
}
