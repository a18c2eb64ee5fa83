use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use crate::{
    api::{ApiError, Post},
    presentation::{
        CustomersContext, FieldRow, FooterContext, FormContext, MoneyPanel, PopupRender,
        PostsContext, PromptRender, RowHint, SectionView, StatusPanel, draw_customers, draw_form, draw_posts,
    },
    query::QueryState,
};

fn screen_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(120, 40)).expect("test terminal")
}

fn footer(status: &str) -> FooterContext<'_> {
    FooterContext {
        status_message: status,
        dirty: false,
        error_count: 0,
        help: Some("q back"),
    }
}

fn sections() -> Vec<SectionView> {
    vec![SectionView {
        title: "Basic Information".into(),
        note: None,
        rows: vec![
            FieldRow {
                label: "Full Name".into(),
                value: "Bobby".into(),
                error: None,
                dirty: false,
                hint: RowHint::Text,
                editing: false,
            },
            FieldRow {
                label: "Email Address".into(),
                value: "bobby@".into(),
                error: Some("Invalid email".into()),
                dirty: true,
                hint: RowHint::Text,
                editing: true,
            },
        ],
    }]
}

#[test]
fn form_shows_sections_errors_and_money_panel() {
    let sections = sections();
    let panel = StatusPanel {
        form_dirty: true,
        address: "No country selected".into(),
        contact_count: 0,
        newsletter: false,
        money: Some(MoneyPanel {
            customer: "Bobby".into(),
            base_amount: "1,00,000".into(),
            quantity: "2".into(),
            total: "2,00,000".into(),
        }),
    };
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            draw_form(
                frame,
                FormContext {
                    title: "Customer Registration Form",
                    sections: &sections,
                    focused: 1,
                    panel: &panel,
                    footer: footer("Editing Email Address"),
                    popup: None,
                    prompt: None,
                },
            )
        })
        .expect("draw");

    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Customer Registration Form"));
    assert!(text.contains("Basic Information"));
    assert!(text.contains("Full Name"));
    assert!(text.contains("Invalid email"));
    assert!(text.contains("Money to Take"));
    assert!(text.contains("Total:"));
    assert!(text.contains("2,00,000"));
    assert!(text.contains("No country selected"));
    assert!(text.contains("Editing Email Address"));
}

#[test]
fn form_prompt_overlays_the_body() {
    let sections = sections();
    let panel = StatusPanel {
        form_dirty: true,
        address: String::new(),
        contact_count: 0,
        newsletter: false,
        money: None,
    };
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            draw_form(
                frame,
                FormContext {
                    title: "Customer Registration Form",
                    sections: &sections,
                    focused: 0,
                    panel: &panel,
                    footer: footer("Confirm with y, cancel with n."),
                    popup: None,
                    prompt: Some(PromptRender {
                        title: "Override Address?",
                        message: "Changing the country will reset the state and city fields.",
                        confirm_label: "OK",
                    }),
                },
            )
        })
        .expect("draw");

    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Override Address?"));
    assert!(text.contains("[y] OK"));
    assert!(text.contains("[n] Cancel"));
    assert!(!text.contains("Money to Take"));
}

#[test]
fn popup_with_out_of_range_selection_still_renders() {
    let sections = sections();
    let panel = StatusPanel {
        form_dirty: false,
        address: String::new(),
        contact_count: 0,
        newsletter: false,
        money: None,
    };
    let options = vec!["India".to_string(), "United States".to_string()];
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            draw_form(
                frame,
                FormContext {
                    title: "Customer Registration Form",
                    sections: &sections,
                    focused: 0,
                    panel: &panel,
                    footer: footer("Choose a country"),
                    popup: Some(PopupRender {
                        title: "Country",
                        options: &options,
                        selected: 7,
                    }),
                    prompt: None,
                },
            )
        })
        .expect("draw");

    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("India"));
    assert!(text.contains("United States"));
}

#[test]
fn customers_loading_error_and_empty_states() {
    let mut terminal = terminal();

    let loading = QueryState::Loading;
    terminal
        .draw(|frame| {
            draw_customers(
                frame,
                CustomersContext {
                    state: &loading,
                    selected: 0,
                    footer: footer("Loading customers..."),
                },
            )
        })
        .expect("draw");
    assert!(screen_text(terminal.backend().buffer()).contains("Loading customers..."));

    let failed = QueryState::Error(ApiError::network());
    terminal
        .draw(|frame| {
            draw_customers(
                frame,
                CustomersContext {
                    state: &failed,
                    selected: 0,
                    footer: footer("failed"),
                },
            )
        })
        .expect("draw");
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Error loading customers"));
    assert!(text.contains("NETWORK_ERROR"));
    assert!(text.contains("Press r to retry"));

    let empty = QueryState::Success {
        data: Vec::new(),
        refreshing: true,
    };
    terminal
        .draw(|frame| {
            draw_customers(
                frame,
                CustomersContext {
                    state: &empty,
                    selected: 0,
                    footer: footer("0 customers"),
                },
            )
        })
        .expect("draw");
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("No customers found."));
    assert!(text.contains("Refreshing..."));
}

#[test]
fn posts_table_with_pager_line() {
    let posts = vec![
        Post {
            id: 1,
            title: "first title".into(),
            body: "first body".into(),
            user_id: 1,
        },
        Post {
            id: 2,
            title: "second title".into(),
            body: "second body".into(),
            user_id: 2,
        },
    ];
    let state = QueryState::Success {
        data: posts.clone(),
        refreshing: false,
    };
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            draw_posts(
                frame,
                PostsContext {
                    state: &state,
                    page_rows: &posts,
                    summary: "Showing 1 to 2 of 2 posts",
                    page: 1,
                    total_pages: 1,
                    page_window: &[1],
                    selected: 0,
                    editor: None,
                    prompt: None,
                    footer: footer("2 posts"),
                },
            )
        })
        .expect("draw");

    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("TITLE"));
    assert!(text.contains("second title"));
    assert!(text.contains("Showing 1 to 2 of 2 posts"));
    assert!(text.contains("[1]"));
    assert!(text.contains("Page 1 of 1"));
}
