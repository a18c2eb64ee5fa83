use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    api::{Post, User},
    query::QueryState,
};

use super::components::{
    render_customers, render_editor, render_footer, render_form_body, render_popup,
    render_posts, render_prompt, render_status_panel,
};

pub struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
}

/// A yes/no question shown at the bottom of the screen.
#[derive(Debug, Clone, Copy)]
pub struct PromptRender<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub confirm_label: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHint {
    Text,
    Select,
    Toggle,
    Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
    pub error: Option<String>,
    pub dirty: bool,
    pub hint: RowHint,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub note: Option<String>,
    pub rows: Vec<FieldRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoneyPanel {
    pub customer: String,
    pub base_amount: String,
    pub quantity: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusPanel {
    pub form_dirty: bool,
    pub address: String,
    pub contact_count: usize,
    pub newsletter: bool,
    pub money: Option<MoneyPanel>,
}

pub struct FooterContext<'a> {
    pub status_message: &'a str,
    pub dirty: bool,
    pub error_count: usize,
    pub help: Option<&'a str>,
}

pub struct FormContext<'a> {
    pub title: &'a str,
    pub sections: &'a [SectionView],
    /// Index of the focused row across all sections.
    pub focused: usize,
    pub panel: &'a StatusPanel,
    pub footer: FooterContext<'a>,
    pub popup: Option<PopupRender<'a>>,
    pub prompt: Option<PromptRender<'a>>,
}

pub fn draw_form(frame: &mut Frame<'_>, ctx: FormContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);

    let cursor_enabled = ctx.popup.is_none() && ctx.prompt.is_none();
    render_form_body(
        frame,
        columns[0],
        ctx.title,
        ctx.sections,
        ctx.focused,
        cursor_enabled,
    );
    render_status_panel(frame, columns[1], ctx.panel);
    render_footer(frame, rows[1], &ctx.footer);

    if let Some(popup) = ctx.popup {
        render_popup(frame, popup);
    }
    if let Some(prompt) = ctx.prompt {
        render_prompt(frame, prompt);
    }
}

pub struct CustomersContext<'a> {
    pub state: &'a QueryState<Vec<User>>,
    pub selected: usize,
    pub footer: FooterContext<'a>,
}

pub fn draw_customers(frame: &mut Frame<'_>, ctx: CustomersContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(frame.area());
    render_customers(frame, rows[0], ctx.state, ctx.selected);
    render_footer(frame, rows[1], &ctx.footer);
}

pub struct EditorRender<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, &'a str)>,
    pub focused: usize,
    pub error: Option<&'a str>,
}

pub struct PostsContext<'a> {
    pub state: &'a QueryState<Vec<Post>>,
    pub page_rows: &'a [Post],
    pub summary: &'a str,
    pub page: usize,
    pub total_pages: usize,
    /// Page numbers shown as jump targets around the current page.
    pub page_window: &'a [usize],
    pub selected: usize,
    pub editor: Option<EditorRender<'a>>,
    pub prompt: Option<PromptRender<'a>>,
    pub footer: FooterContext<'a>,
}

pub fn draw_posts(frame: &mut Frame<'_>, ctx: PostsContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(frame.area());
    render_posts(frame, rows[0], &ctx);
    render_footer(frame, rows[1], &ctx.footer);
    if let Some(editor) = &ctx.editor {
        render_editor(frame, editor);
    }
    if let Some(prompt) = ctx.prompt {
        render_prompt(frame, prompt);
    }
}
