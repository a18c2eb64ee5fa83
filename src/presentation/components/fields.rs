use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::super::view::{FieldRow, RowHint, SectionView};

const SELECT_MARK: &str = "» ";
const LABEL_SEPARATOR: &str = ": ";

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    sections: &[SectionView],
    focused: usize,
    enable_cursor: bool,
) {
    let layout = build_lines(sections, focused);
    let offset = scroll_offset(layout.focused_line, area.height);
    let widget = Paragraph::new(layout.lines).scroll((offset, 0));
    frame.render_widget(widget, area);

    if enable_cursor
        && let Some(cursor) = layout.cursor
        && cursor.line >= offset
        && cursor.line - offset < area.height
    {
        let x = area
            .x
            .saturating_add(cursor.column)
            .min(area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y + cursor.line - offset));
    }
}

pub(crate) struct FieldLines {
    pub(crate) lines: Vec<Line<'static>>,
    pub(crate) focused_line: u16,
    pub(crate) cursor: Option<CursorHint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CursorHint {
    pub(crate) line: u16,
    pub(crate) column: u16,
}

pub(crate) fn build_lines(sections: &[SectionView], focused: usize) -> FieldLines {
    let mut lines = Vec::new();
    let mut focused_line = 0u16;
    let mut cursor = None;
    let mut index = 0usize;

    for section in sections {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(note) = &section.note {
            lines.push(Line::from(Span::styled(
                note.clone(),
                Style::default().fg(Color::Yellow),
            )));
        }
        if section.rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (empty)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for row in &section.rows {
            let is_selected = index == focused;
            if is_selected {
                focused_line = lines.len() as u16;
                if row.editing && row.hint == RowHint::Text {
                    cursor = Some(CursorHint {
                        line: focused_line,
                        column: value_column(row) + row.value.width() as u16,
                    });
                }
            }
            lines.push(row_line(row, is_selected));
            if let Some(error) = &row.error {
                lines.push(Line::from(Span::styled(
                    format!("    ⚠ {error}"),
                    Style::default().fg(Color::Red),
                )));
            }
            index += 1;
        }
    }

    FieldLines {
        lines,
        focused_line,
        cursor,
    }
}

fn value_column(row: &FieldRow) -> u16 {
    (SELECT_MARK.width() + row.label.width() + LABEL_SEPARATOR.width()) as u16
}

fn row_line(row: &FieldRow, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { SELECT_MARK } else { "  " };
    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value_style = if row.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    let value = match row.hint {
        RowHint::Select => format!("{} ▾", display_or_placeholder(&row.value)),
        RowHint::Toggle => row.value.clone(),
        RowHint::Action => String::new(),
        RowHint::Text => row.value.clone(),
    };

    let mut spans = vec![
        Span::raw(marker),
        Span::styled(row.label.clone(), label_style),
    ];
    if row.hint != RowHint::Action {
        spans.push(Span::raw(LABEL_SEPARATOR));
        spans.push(Span::styled(value, value_style));
    }
    if row.dirty {
        spans.push(Span::styled(" *", Style::default().fg(Color::Magenta)));
    }
    Line::from(spans)
}

fn display_or_placeholder(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}

fn scroll_offset(focused_line: u16, height: u16) -> u16 {
    let window = height.max(1);
    if focused_line < window {
        0
    } else {
        focused_line + 1 - window
    }
}
