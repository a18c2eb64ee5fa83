use std::{cell::RefCell, rc::Rc};

use anyhow::anyhow;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    app::{
        CustomerForm, FormApp, UiOptions,
        rows::{AdminField, Row},
    },
    controller::PendingChange,
    domain::FormValues,
    form::FieldKey,
};

fn build_app() -> FormApp {
    CustomerForm::new().into_app().expect("form app")
}

fn press(app: &mut FormApp, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .expect("key handled");
}

fn ctrl(app: &mut FormApp, ch: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
        .expect("key handled");
}

fn type_text(app: &mut FormApp, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

/// Opens the popup of `row` and moves `steps` entries down from the
/// preselected one before choosing.
fn choose(app: &mut FormApp, row: Row, steps: usize) {
    app.focus_for_test(row);
    press(app, KeyCode::Enter);
    for _ in 0..steps {
        press(app, KeyCode::Down);
    }
    press(app, KeyCode::Enter);
}

fn section_titles(app: &FormApp) -> Vec<String> {
    app.section_views_for_test()
        .into_iter()
        .map(|section| section.title)
        .collect()
}

#[test]
fn typing_into_a_text_row_edits_the_field() {
    let mut app = build_app();
    app.focus_for_test(Row::Field(FieldKey::Name));
    type_text(&mut app, "Jo");

    let store = app.store_for_test();
    assert_eq!(store.values().name, "Jo");
    assert!(store.is_field_dirty(FieldKey::Name));
    assert_eq!(app.status_for_test(), "Editing Full Name");
}

#[test]
fn backspace_then_digits_replace_a_numeric_value() {
    let mut app = build_app();
    app.focus_for_test(Row::Field(FieldKey::Age));
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "42");
    assert_eq!(app.store_for_test().values().age, 42);
}

#[test]
fn choosing_a_country_fills_state_and_city() {
    let mut app = build_app();
    choose(&mut app, Row::Field(FieldKey::Country), 0);

    let store = app.store_for_test();
    assert_eq!(store.values().country, "IN");
    assert_eq!(store.values().state, "UP");
    assert_eq!(store.values().city, "Lucknow");
    assert!(!store.is_address_dirty());
    assert_eq!(app.controller_for_test().pending(), None);
}

#[test]
fn country_change_after_manual_state_waits_for_confirmation() {
    let mut app = build_app();
    choose(&mut app, Row::Field(FieldKey::Country), 0);
    choose(&mut app, Row::Field(FieldKey::State), 1);
    assert_eq!(app.store_for_test().values().state, "MH");
    assert_eq!(app.store_for_test().values().city, "Mumbai");

    choose(&mut app, Row::Field(FieldKey::Country), 1);
    assert_eq!(
        app.controller_for_test().pending(),
        Some(&PendingChange::Country("US".into()))
    );
    assert_eq!(app.store_for_test().values().country, "IN");
    assert_eq!(app.store_for_test().values().state, "MH");

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.controller_for_test().pending(), None);
    assert_eq!(app.store_for_test().values().country, "IN");
    assert_eq!(app.store_for_test().values().city, "Mumbai");

    choose(&mut app, Row::Field(FieldKey::Country), 1);
    press(&mut app, KeyCode::Char('y'));
    let store = app.store_for_test();
    assert_eq!(store.values().country, "US");
    assert_eq!(store.values().state, "CA");
    assert_eq!(store.values().city, "Los Angeles");
    assert!(!store.is_address_dirty());
}

#[test]
fn keys_other_than_answers_are_ignored_while_a_prompt_is_open() {
    let mut app = build_app();
    choose(&mut app, Row::Field(FieldKey::Country), 0);
    choose(&mut app, Row::Field(FieldKey::State), 1);
    choose(&mut app, Row::Field(FieldKey::Country), 1);

    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "zz");
    assert!(app.controller_for_test().pending().is_some());
    assert_eq!(app.store_for_test().values().name, "");
}

#[test]
fn save_reports_issues_then_submits_valid_values() {
    let submitted: Rc<RefCell<Vec<FormValues>>> = Rc::default();
    let sink = Rc::clone(&submitted);
    let mut app = CustomerForm::new()
        .with_submit_handler(move |values| {
            sink.borrow_mut().push(values.clone());
            Ok(())
        })
        .into_app()
        .expect("form app");

    ctrl(&mut app, 's');
    assert!(app.status_for_test().ends_with("issue(s) remaining"));
    assert_eq!(
        app.store_for_test().error(FieldKey::Name),
        Some("Name is required")
    );
    assert!(submitted.borrow().is_empty());

    app.focus_for_test(Row::Field(FieldKey::Name));
    type_text(&mut app, "Jane Doe");
    app.focus_for_test(Row::Field(FieldKey::Email));
    type_text(&mut app, "jane@example.com");
    choose(&mut app, Row::Field(FieldKey::Country), 1);

    ctrl(&mut app, 's');
    assert_eq!(app.status_for_test(), "Customer saved. Press Ctrl+Q to exit.");
    let saved = app.result_for_test().expect("saved values");
    assert_eq!(saved.name, "Jane Doe");
    assert_eq!(saved.country, "US");
    assert_eq!(submitted.borrow().len(), 1);
    assert!(!app.store_for_test().is_dirty());
}

#[test]
fn failing_submit_handler_keeps_the_form_dirty() {
    let mut app = CustomerForm::new()
        .with_initial_data(FormValues {
            email: "jane@example.com".into(),
            country: "IN".into(),
            state: "DL".into(),
            city: "New Delhi".into(),
            ..FormValues::default()
        })
        .with_submit_handler(|_| Err(anyhow!("backend offline")))
        .into_app()
        .expect("form app");

    app.focus_for_test(Row::Field(FieldKey::Name));
    type_text(&mut app, "Jane");
    ctrl(&mut app, 's');

    assert_eq!(app.status_for_test(), "Save failed: backend offline");
    assert!(app.result_for_test().is_none());
    assert!(app.store_for_test().is_dirty());
    assert!(!app.store_for_test().is_submitting());
}

#[test]
fn leaving_a_dirty_form_asks_first() {
    let mut app = build_app();
    app.focus_for_test(Row::Field(FieldKey::Name));
    type_text(&mut app, "Jo");

    ctrl(&mut app, 'q');
    assert_eq!(app.controller_for_test().pending(), Some(&PendingChange::Leave));
    assert!(!app.should_quit_for_test());

    press(&mut app, KeyCode::Char('n'));
    assert!(!app.should_quit_for_test());
    assert_eq!(app.controller_for_test().pending(), None);

    ctrl(&mut app, 'q');
    press(&mut app, KeyCode::Char('y'));
    assert!(app.should_quit_for_test());
}

#[test]
fn leaving_a_clean_form_is_immediate() {
    let mut app = build_app();
    ctrl(&mut app, 'q');
    assert!(app.should_quit_for_test());
}

#[test]
fn exit_without_confirmation_when_disabled() {
    let mut app = CustomerForm::new()
        .with_options(UiOptions::default().with_confirm_exit(false))
        .into_app()
        .expect("form app");
    app.focus_for_test(Row::Field(FieldKey::Name));
    type_text(&mut app, "Jo");
    ctrl(&mut app, 'q');
    assert!(app.should_quit_for_test());
}

#[test]
fn selecting_a_customer_shows_admin_panel_and_money() {
    let mut app = build_app();
    assert!(!section_titles(&app).contains(&"Admin Support".to_string()));

    choose(&mut app, Row::Customer, 1);
    assert_eq!(app.controller_for_test().selected_customer_id(), Some("1"));
    assert_eq!(app.store_for_test().values().name, "Bobby");
    assert!(section_titles(&app).contains(&"Admin Support".to_string()));
    let money = app.status_panel_for_test().money.expect("money panel");
    assert_eq!(money.total, "1,00,000");

    app.focus_for_test(Row::Field(FieldKey::EstimatedQuantity));
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "2");
    let money = app.status_panel_for_test().money.expect("money panel");
    assert_eq!(money.quantity, "2");
    assert_eq!(money.total, "2,00,000");
}

#[test]
fn switching_customer_with_edited_admin_copy_needs_confirmation() {
    let mut app = build_app();
    choose(&mut app, Row::Customer, 1);
    app.focus_for_test(Row::Admin(AdminField::Device));
    type_text(&mut app, " Max");
    assert!(app.controller_for_test().is_admin_customer_dirty());
    let admin = app
        .section_views_for_test()
        .into_iter()
        .find(|section| section.title == "Admin Support")
        .expect("admin section");
    assert_eq!(
        admin.note.as_deref(),
        Some("⚠ Customer details have been modified")
    );

    choose(&mut app, Row::Customer, 1);
    assert_eq!(
        app.controller_for_test().pending(),
        Some(&PendingChange::Customer(Some("2".into())))
    );
    assert_eq!(app.store_for_test().values().name, "Bobby");

    press(&mut app, KeyCode::Char('y'));
    assert_eq!(app.store_for_test().values().name, "Alice");
    assert_eq!(app.store_for_test().values().age, 32);
    assert!(!app.controller_for_test().is_admin_customer_dirty());
}

#[test]
fn contacts_are_added_focused_and_removed() {
    let mut app = build_app();
    ctrl(&mut app, 'n');
    assert_eq!(app.store_for_test().values().contacts.len(), 1);
    assert_eq!(
        app.focused_row_for_test(),
        Some(Row::Field(FieldKey::ContactValue(0)))
    );

    type_text(&mut app, "555-0100");
    assert_eq!(app.store_for_test().values().contacts[0].value, "555-0100");

    choose(&mut app, Row::Field(FieldKey::ContactType(0)), 1);
    assert_eq!(
        app.store_for_test().values().contacts[0].kind,
        crate::domain::ContactType::Email
    );

    app.focus_for_test(Row::Field(FieldKey::ContactValue(0)));
    ctrl(&mut app, 'd');
    assert!(app.store_for_test().values().contacts.is_empty());
    let contacts = app
        .section_views_for_test()
        .into_iter()
        .find(|section| section.title == "Contact Information")
        .expect("contacts section");
    assert_eq!(contacts.note.as_deref(), Some("No contacts added yet"));
}

#[test]
fn newsletter_toggle_reveals_company_section() {
    let mut app = build_app();
    assert!(!section_titles(&app).contains(&"Company Information".to_string()));
    app.focus_for_test(Row::Field(FieldKey::Newsletter));
    press(&mut app, KeyCode::Char(' '));
    assert!(app.store_for_test().values().newsletter);
    assert!(section_titles(&app).contains(&"Company Information".to_string()));
    assert!(app.status_panel_for_test().newsletter);
}

#[test]
fn popup_escape_leaves_value_untouched() {
    let mut app = build_app();
    app.focus_for_test(Row::Field(FieldKey::Country));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.store_for_test().values().country, "");
}

#[test]
fn ctrl_r_resets_form_and_customer_panel() {
    let mut app = build_app();
    choose(&mut app, Row::Customer, 1);
    app.focus_for_test(Row::Admin(AdminField::Device));
    type_text(&mut app, " Max");
    app.focus_for_test(Row::Field(FieldKey::Name));
    type_text(&mut app, "!");
    assert!(app.controller_for_test().is_admin_customer_dirty());
    assert!(app.store_for_test().is_dirty());

    ctrl(&mut app, 'r');

    assert_eq!(app.status_for_test(), "Form reset");
    assert_eq!(app.controller_for_test().selected_customer_id(), None);
    assert!(!app.controller_for_test().is_admin_customer_dirty());
    assert!(!app.store_for_test().is_dirty());
    assert_eq!(app.store_for_test().values().name, "");
    assert!(!section_titles(&app).contains(&"Admin Support".to_string()));
    assert!(app.status_panel_for_test().money.is_none());
    assert_eq!(app.focused_row_for_test(), Some(Row::Customer));
}
