use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::api::ApiError;

pub fn render_loading(frame: &mut Frame<'_>, area: Rect, title: &str) {
    let widget = Paragraph::new(Line::from(Span::styled(
        format!("Loading {}...", title.to_lowercase()),
        Style::default().fg(Color::Gray),
    )))
    .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

pub fn render_error(frame: &mut Frame<'_>, area: Rect, title: &str, error: &ApiError) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Error loading {}", title.to_lowercase()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    let width = area.width.saturating_sub(4).max(10) as usize;
    for chunk in textwrap::wrap(&error.message, width) {
        lines.push(Line::from(chunk.into_owned()));
    }
    lines.push(Line::from(Span::styled(
        format!("({})", error.kind),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press r to retry",
        Style::default().fg(Color::Yellow),
    )));
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(widget, area);
}
