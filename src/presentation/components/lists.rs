use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

use crate::{api::User, query::QueryState};

use super::super::view::{EditorRender, PostsContext};
use super::{
    layout::popup_rect,
    states::{render_error, render_loading},
};

pub fn render_customers(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &QueryState<Vec<User>>,
    selected: usize,
) {
    const TITLE: &str = "Customers";
    let (users, refreshing) = match state {
        QueryState::Loading => return render_loading(frame, area, TITLE),
        QueryState::Error(error) => return render_error(frame, area, TITLE, error),
        QueryState::Success { data, refreshing } => (data, *refreshing),
    };

    let title = if refreshing {
        format!("{TITLE} (Refreshing...)")
    } else {
        TITLE.to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    if users.is_empty() {
        frame.render_widget(Paragraph::new("No customers found.").block(block), area);
        return;
    }

    let items: Vec<ListItem<'static>> = users.iter().map(customer_card).collect();
    let mut list_state = ListState::default();
    list_state.select(Some(selected.min(users.len() - 1)));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub(crate) fn customer_card(user: &User) -> ListItem<'static> {
    let dim = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                user.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{}", user.id), dim),
        ]),
        Line::from(format!("  Email: {}", user.email)),
        Line::from(format!("  Phone: {}", user.phone)),
        Line::from(format!(
            "  Company: {}  City: {}",
            user.company.name, user.address.city
        )),
        Line::from(format!("  Website: {}", user.website)),
        Line::default(),
    ];
    ListItem::new(lines)
}

pub fn render_posts(frame: &mut Frame<'_>, area: Rect, ctx: &PostsContext<'_>) {
    const TITLE: &str = "Posts";
    let refreshing = match ctx.state {
        QueryState::Loading => return render_loading(frame, area, TITLE),
        QueryState::Error(error) => return render_error(frame, area, TITLE, error),
        QueryState::Success { refreshing, .. } => *refreshing,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let title = if refreshing {
        format!("{TITLE} (Refreshing...)")
    } else {
        TITLE.to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    if ctx.page_rows.is_empty() {
        frame.render_widget(Paragraph::new("No posts found.").block(block), chunks[0]);
        return;
    }

    let body_width = chunks[0].width.saturating_sub(40).max(10) as usize;
    let rows: Vec<Row<'static>> = ctx
        .page_rows
        .iter()
        .map(|post| {
            Row::new(vec![
                Cell::from(post.id.to_string()),
                Cell::from(post.title.clone()),
                Cell::from(truncate(&post.body.replace('\n', " "), body_width)),
                Cell::from(post.user_id.to_string()),
            ])
        })
        .collect();
    let header = Row::new(vec!["ID", "TITLE", "BODY", "USER ID"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Percentage(35),
            Constraint::Min(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("» ");
    let mut table_state = TableState::default();
    table_state.select(Some(ctx.selected.min(ctx.page_rows.len() - 1)));
    frame.render_stateful_widget(table, chunks[0], &mut table_state);

    let pager = Paragraph::new(pager_line(ctx)).style(Style::default().fg(Color::Gray));
    frame.render_widget(pager, chunks[1]);
}

fn pager_line(ctx: &PostsContext<'_>) -> String {
    let pages: Vec<String> = ctx
        .page_window
        .iter()
        .map(|page| {
            if *page == ctx.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    format!(
        "{}   ‹ {} ›   Page {} of {}",
        ctx.summary,
        pages.join(" "),
        ctx.page,
        ctx.total_pages.max(1)
    )
}

pub fn render_editor(frame: &mut Frame<'_>, editor: &EditorRender<'_>) {
    let base = frame.area();
    let width = base.width.saturating_sub(base.width / 4).max(40);
    let height = (editor.fields.len() as u16 * 2 + 4).min(base.height);
    let area = popup_rect(base, width, height);
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (index, (label, value)) in editor.fields.iter().enumerate() {
        let focused = index == editor.focused;
        let marker = if focused { "» " } else { "  " };
        let style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label}: "), style),
            Span::raw((*value).to_string()),
        ]));
        lines.push(Line::default());
    }
    if let Some(error) = editor.error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(editor.title.to_string())
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(widget, area);
}

/// Cuts `text` to `max` display columns, marking the cut with an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}
