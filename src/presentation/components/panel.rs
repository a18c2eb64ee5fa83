use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::StatusPanel;

/// The admin side panel: money to take for the selected customer, then the
/// form status summary.
pub fn render_status_panel(frame: &mut Frame<'_>, area: Rect, panel: &StatusPanel) {
    let money_height = if panel.money.is_some() { 6 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(money_height), Constraint::Min(6)])
        .split(area);

    if let Some(money) = &panel.money {
        let lines = vec![
            Line::from(format!("Customer: {}", money.customer)),
            Line::from(format!("Base Amount: ₹{}", money.base_amount)),
            Line::from(format!("Quantity: {}", money.quantity)),
            Line::from(Span::styled(
                format!("Total: ₹{}", money.total),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let widget = Paragraph::new(lines)
            .block(Block::default().title("Money to Take").borders(Borders::ALL));
        frame.render_widget(widget, chunks[0]);
    }

    let widget = Paragraph::new(status_lines(panel))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Form Status").borders(Borders::ALL));
    frame.render_widget(widget, chunks[1]);
}

pub(crate) fn status_lines(panel: &StatusPanel) -> Vec<Line<'static>> {
    let (status, status_color) = if panel.form_dirty {
        ("⚠ Form has unsaved changes", Color::Yellow)
    } else {
        ("✔ Form is clean", Color::Green)
    };
    let (newsletter, newsletter_color) = if panel.newsletter {
        ("✔ Subscribed", Color::Green)
    } else {
        ("✘ Not subscribed", Color::DarkGray)
    };
    let heading = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(status, Style::default().fg(status_color))),
        Line::default(),
        Line::from(Span::styled("Address Information", heading)),
        Line::from(panel.address.clone()),
        Line::default(),
        Line::from(Span::styled("Contact Count", heading)),
        Line::from(format!("{} contact(s) added", panel.contact_count)),
        Line::default(),
        Line::from(Span::styled("Newsletter Subscription", heading)),
        Line::from(Span::styled(
            newsletter,
            Style::default().fg(newsletter_color),
        )),
    ]
}
