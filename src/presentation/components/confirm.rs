use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::view::PromptRender;
use super::layout::bottom_rect;

/// Warning snackbar with the two answers spelled out.
pub fn render_prompt(frame: &mut Frame<'_>, prompt: PromptRender<'_>) {
    let area = bottom_rect(frame.area(), 72, 5);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(prompt.message.to_string()),
        Line::from(vec![
            Span::styled(
                format!("[y] {}", prompt.confirm_label),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[n] Cancel", Style::default().fg(Color::Gray)),
        ]),
    ];
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(prompt.title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(widget, area);
}
