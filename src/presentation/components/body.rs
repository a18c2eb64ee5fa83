use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};

use super::super::view::SectionView;
use super::fields::render_fields;

pub fn render_form_body(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    sections: &[SectionView],
    focused: usize,
    enable_cursor: bool,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if sections.iter().all(|section| section.rows.is_empty()) {
        let placeholder = Paragraph::new("No editable fields").block(block);
        frame.render_widget(placeholder, area);
        return;
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_fields(frame, inner, sections, focused, enable_cursor);
}
