use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;

use crate::{
    controller::{DependencyController, PendingChange, address_summary, city_options, format_amount, state_options},
    domain::{
        AdminCustomerDetails, FormValues,
        lookup::{self, COUNTRIES, EXISTING_CUSTOMERS},
    },
    form::{
        CommandEffect, FieldKey, FieldValue, FormCommand, FormEngine, FormStore, FormValidator,
        ValidationOutcome, format_number, validate_form,
    },
    presentation::{
        self, FieldRow, FooterContext, FormContext, MoneyPanel, PromptRender, RowHint,
        SectionView, StatusPanel,
    },
};

use super::{
    input::{KeyCommand, classify, classify_prompt, edit_buffer},
    options::UiOptions,
    popup::PopupState,
    rows::{AdminField, Row, RowKind, SectionLayout, flatten, layout},
    status::StatusLine,
    terminal::TerminalGuard,
};

const TITLE: &str = "Customer Registration Form";
const HELP_TEXT: &str = "Tab/Shift+Tab move • Enter choose • Space toggle • Ctrl+N add contact • Ctrl+D remove contact • Ctrl+R reset • Ctrl+S save • Ctrl+Q leave";

/// Receives validated values on save; an error keeps the form dirty.
pub type SubmitHandler = Box<dyn FnMut(&FormValues) -> Result<()>>;

struct EditBuffer {
    row: Row,
    text: String,
}

pub(crate) struct FormApp {
    store: FormStore,
    controller: DependencyController,
    validator: FormValidator,
    options: UiOptions,
    status: StatusLine,
    global_errors: Vec<String>,
    focus: usize,
    edit: Option<EditBuffer>,
    popup: Option<PopupState<Row>>,
    submit_handler: Option<SubmitHandler>,
    result: Option<FormValues>,
    should_quit: bool,
}

impl FormApp {
    pub fn new(
        store: FormStore,
        validator: FormValidator,
        options: UiOptions,
        submit_handler: Option<SubmitHandler>,
    ) -> Self {
        Self {
            store,
            controller: DependencyController::new(),
            validator,
            options,
            status: StatusLine::new(),
            global_errors: Vec::new(),
            focus: 0,
            edit: None,
            popup: None,
            submit_handler,
            result: None,
            should_quit: false,
        }
    }

    /// Runs until the operator leaves; yields the last saved values.
    pub fn run(&mut self) -> Result<Option<FormValues>> {
        let mut terminal = TerminalGuard::new()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        Ok(self.result.take())
    }

    fn sections(&self) -> Vec<SectionLayout> {
        layout(&self.store, &self.controller)
    }

    fn rows(&self) -> Vec<Row> {
        flatten(&self.sections())
    }

    fn focused_row(&self) -> Option<Row> {
        self.rows().get(self.focus).copied()
    }

    fn clamp_focus(&mut self) {
        let count = self.rows().len();
        self.focus = self.focus.min(count.saturating_sub(1));
    }

    fn focus_row(&mut self, target: Row) {
        if let Some(index) = self.rows().iter().position(|row| *row == target) {
            self.focus = index;
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.controller.pending().is_some() {
            self.handle_prompt_key(&key);
            return Ok(());
        }
        if self.handle_popup_key(&key) {
            return Ok(());
        }

        match classify(&key) {
            KeyCommand::Save => self.on_save(),
            KeyCommand::Quit => self.on_leave(),
            KeyCommand::NextField => self.move_focus(1),
            KeyCommand::PrevField => self.move_focus(-1),
            KeyCommand::Activate => self.activate(),
            KeyCommand::Dismiss => {
                self.blur();
                self.status.ready();
            }
            KeyCommand::AddEntry => self.add_contact(),
            KeyCommand::RemoveEntry => self.remove_contact(),
            KeyCommand::Reset => self.on_reset(),
            KeyCommand::Edit(event) => self.handle_field_input(&event),
            KeyCommand::Confirm | KeyCommand::Cancel | KeyCommand::None => {}
        }
        Ok(())
    }

    fn dispatch(&mut self, command: FormCommand) -> Option<CommandEffect> {
        let mut engine = FormEngine::new(&mut self.store, &mut self.controller, &self.validator);
        let outcome = engine.dispatch(command);
        self.clamp_focus();
        match outcome {
            Ok(CommandEffect::ConfirmationRequired) => {
                self.status.awaiting_confirmation();
                Some(CommandEffect::ConfirmationRequired)
            }
            Ok(CommandEffect::Leave) => {
                self.should_quit = true;
                Some(CommandEffect::Leave)
            }
            Ok(CommandEffect::None) => Some(CommandEffect::None),
            Err(message) => {
                self.status.set_raw(message);
                None
            }
        }
    }

    fn handle_prompt_key(&mut self, key: &KeyEvent) {
        match classify_prompt(key) {
            KeyCommand::Confirm => {
                self.dispatch(FormCommand::ConfirmPending);
                if !self.should_quit {
                    self.status.value_updated();
                }
            }
            KeyCommand::Cancel => {
                self.dispatch(FormCommand::CancelPending);
                self.status.ready();
            }
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: &KeyEvent) -> bool {
        let Some(popup) = &mut self.popup else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.popup = None;
                self.status.ready();
            }
            KeyCode::Up => popup.select_previous(),
            KeyCode::Down => popup.select_next(),
            KeyCode::Enter => {
                let row = popup.target;
                let value = popup.selected_value().map(str::to_string);
                self.popup = None;
                self.apply_selection(row, value);
            }
            _ => {}
        }
        true
    }

    fn move_focus(&mut self, delta: i32) {
        self.blur();
        let count = self.rows().len() as i32;
        if count == 0 {
            return;
        }
        self.focus = (self.focus as i32 + delta).rem_euclid(count) as usize;
        if let Some(row) = self.focused_row() {
            self.status.set_raw(format!("Focus: {}", row.label()));
        }
    }

    /// Drops the edit buffer and validates the row focus is leaving.
    fn blur(&mut self) {
        self.edit = None;
        let Some(key) = self.focused_row().and_then(Row::field_key) else {
            return;
        };
        if self.options.auto_validate {
            self.dispatch(FormCommand::Blur(key));
        }
    }

    fn activate(&mut self) {
        let Some(row) = self.focused_row() else {
            return;
        };
        match row.kind() {
            RowKind::Select => self.open_popup(row),
            RowKind::Toggle => self.toggle_newsletter(),
            RowKind::Action => self.add_contact(),
            RowKind::Text | RowKind::Numeric => self.move_focus(1),
        }
    }

    fn handle_field_input(&mut self, event: &KeyEvent) {
        let Some(row) = self.focused_row() else {
            return;
        };
        match row.kind() {
            RowKind::Text | RowKind::Numeric => {
                let mut text = match self.edit.take() {
                    Some(buffer) if buffer.row == row => buffer.text,
                    _ => self.row_value(row),
                };
                let changed = edit_buffer(&mut text, event);
                self.edit = Some(EditBuffer {
                    row,
                    text: text.clone(),
                });
                if changed {
                    self.commit(row, text);
                    self.status.editing(&row.label());
                }
            }
            RowKind::Toggle if event.code == KeyCode::Char(' ') => self.toggle_newsletter(),
            RowKind::Select if event.code == KeyCode::Char(' ') => self.open_popup(row),
            _ => {}
        }
    }

    fn commit(&mut self, row: Row, text: String) {
        match row {
            Row::Field(key) => {
                self.dispatch(FormCommand::Edit {
                    key,
                    value: FieldValue::Text(text),
                });
            }
            Row::Admin(field) => {
                let mut details = self.controller.admin_details().clone();
                match field {
                    AdminField::Name => details.name = text,
                    AdminField::Device => details.device = text,
                    AdminField::Email => details.email = text,
                    AdminField::Age => match text.trim().parse::<u32>() {
                        Ok(age) => details.age = age,
                        Err(_) if text.trim().is_empty() => details.age = 0,
                        Err(_) => {
                            self.status.set_raw("Age must be a whole number");
                            return;
                        }
                    },
                }
                self.dispatch(FormCommand::EditAdminDetails(details));
            }
            Row::Customer | Row::AddContact => {}
        }
    }

    fn toggle_newsletter(&mut self) {
        let current = self.store.values().newsletter;
        self.dispatch(FormCommand::Edit {
            key: FieldKey::Newsletter,
            value: FieldValue::Bool(!current),
        });
        self.status.value_updated();
    }

    fn add_contact(&mut self) {
        self.blur();
        if self.dispatch(FormCommand::AddContact).is_some() {
            let index = self.store.values().contacts.len().saturating_sub(1);
            self.focus_row(Row::Field(FieldKey::ContactValue(index)));
            self.status.set_raw("Contact added");
        }
    }

    fn remove_contact(&mut self) {
        let Some(index) = self
            .focused_row()
            .and_then(Row::field_key)
            .and_then(FieldKey::contact_index)
        else {
            self.status.set_raw("Move to a contact to remove it");
            return;
        };
        self.edit = None;
        if self.dispatch(FormCommand::RemoveContact(index)).is_some() {
            self.status.set_raw("Contact removed");
        }
    }

    fn open_popup(&mut self, row: Row) {
        self.edit = None;
        let values = self.store.values();
        let to_options = |options: &[crate::domain::SelectOption]| {
            options
                .iter()
                .map(|option| (Some(option.value.to_string()), option.label.to_string()))
                .collect::<Vec<_>>()
        };
        let (options, current) = match row {
            Row::Customer => {
                let mut options = vec![(None, "None".to_string())];
                options.extend(
                    EXISTING_CUSTOMERS
                        .iter()
                        .map(|customer| (Some(customer.id.to_string()), customer.name.to_string())),
                );
                (options, self.controller.selected_customer_id().map(str::to_string))
            }
            Row::Field(FieldKey::Country) => (to_options(COUNTRIES), Some(values.country.clone())),
            Row::Field(FieldKey::State) => (to_options(state_options(values)), Some(values.state.clone())),
            Row::Field(FieldKey::City) => (to_options(city_options(values)), Some(values.city.clone())),
            Row::Field(FieldKey::ContactType(index)) => {
                let current = values
                    .contacts
                    .get(index)
                    .and_then(|contact| serde_json::to_value(contact.kind).ok())
                    .and_then(|value| value.as_str().map(str::to_string));
                (to_options(&lookup::contact_type_options()), current)
            }
            _ => return,
        };
        match PopupState::new(row, row.label(), options, current.as_deref()) {
            Some(popup) => {
                self.popup = Some(popup);
                self.status.set_raw("Use ↑/↓ and Enter to choose");
            }
            None => self.status.set_raw("No options available"),
        }
    }

    fn apply_selection(&mut self, row: Row, value: Option<String>) {
        let effect = match row {
            Row::Customer => self.dispatch(FormCommand::SelectCustomer(value)),
            Row::Field(key) => self.dispatch(FormCommand::Edit {
                key,
                value: FieldValue::Text(value.unwrap_or_default()),
            }),
            Row::AddContact | Row::Admin(_) => None,
        };
        if effect == Some(CommandEffect::None) {
            if self.options.auto_validate
                && let Some(key) = row.field_key()
            {
                self.dispatch(FormCommand::Blur(key));
            }
            self.status.value_updated();
        }
    }

    fn on_save(&mut self) {
        if self.store.is_submitting() {
            return;
        }
        self.edit = None;
        match validate_form(&mut self.store, &self.validator) {
            ValidationOutcome::Valid(_) => {
                self.global_errors.clear();
                self.status.saving();
                let values = self.store.begin_submit();
                let outcome = match self.submit_handler.as_mut() {
                    Some(handler) => handler(&values),
                    None => Ok(()),
                };
                match outcome {
                    Ok(()) => {
                        tracing::info!(name = %values.name, "customer form submitted");
                        self.store.finish_submit(true);
                        self.result = Some(values);
                        self.status.saved();
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "submit handler failed");
                        self.store.finish_submit(false);
                        self.status.set_raw(format!("Save failed: {err}"));
                    }
                }
            }
            ValidationOutcome::Invalid {
                issues,
                global_errors,
            } => {
                self.global_errors = global_errors;
                self.status.issues_remaining(issues);
            }
            ValidationOutcome::BuildError { message } => {
                self.global_errors = vec![message.clone()];
                self.status.set_raw(message);
            }
        }
    }

    fn on_reset(&mut self) {
        if self.store.is_submitting() {
            return;
        }
        self.edit = None;
        self.popup = None;
        self.global_errors.clear();
        if self.dispatch(FormCommand::Reset).is_some() {
            self.focus = 0;
            self.status.set_raw("Form reset");
        }
    }

    fn on_leave(&mut self) {
        self.blur();
        if !self.options.confirm_exit {
            self.should_quit = true;
            return;
        }
        self.dispatch(FormCommand::RequestLeave);
    }

    fn row_value(&self, row: Row) -> String {
        let values = self.store.values();
        let admin = self.controller.admin_details();
        match row {
            Row::Customer => self
                .controller
                .selected_customer()
                .map_or_else(|| "None".to_string(), |customer| customer.name.to_string()),
            Row::AddContact => String::new(),
            Row::Admin(field) => admin_value(admin, field),
            Row::Field(FieldKey::Country) => lookup::country_label(&values.country)
                .unwrap_or(values.country.as_str())
                .to_string(),
            Row::Field(FieldKey::State) => lookup::state_label(&values.country, &values.state)
                .unwrap_or(values.state.as_str())
                .to_string(),
            Row::Field(FieldKey::Newsletter) => {
                let label = if values.newsletter { "[x] Yes" } else { "[ ] No" };
                label.to_string()
            }
            Row::Field(key) => self
                .store
                .value(key)
                .map(|value| value.display())
                .unwrap_or_default(),
        }
    }

    fn section_views(&self) -> Vec<SectionView> {
        self.sections()
            .into_iter()
            .map(|section| {
                let note = match section.title {
                    "Admin Support" if self.controller.is_admin_customer_dirty() => {
                        Some("⚠ Customer details have been modified".to_string())
                    }
                    "Contact Information" if self.store.values().contacts.is_empty() => {
                        Some("No contacts added yet".to_string())
                    }
                    _ => None,
                };
                let rows = section.rows.iter().map(|row| self.field_row(*row)).collect();
                SectionView {
                    title: section.title.to_string(),
                    note,
                    rows,
                }
            })
            .collect()
    }

    fn field_row(&self, row: Row) -> FieldRow {
        let editing = self.edit.as_ref().filter(|buffer| buffer.row == row);
        let value = match editing {
            Some(buffer) => buffer.text.clone(),
            None => self.row_value(row),
        };
        let (error, dirty) = match row {
            Row::Field(key) => (
                self.store.error(key).map(str::to_string),
                self.store.is_field_dirty(key),
            ),
            Row::Admin(_) => (None, self.controller.is_admin_customer_dirty()),
            Row::Customer | Row::AddContact => (None, false),
        };
        let hint = match row.kind() {
            RowKind::Text | RowKind::Numeric => RowHint::Text,
            RowKind::Select => RowHint::Select,
            RowKind::Toggle => RowHint::Toggle,
            RowKind::Action => RowHint::Action,
        };
        FieldRow {
            label: row.label(),
            value,
            error,
            dirty,
            hint,
            editing: editing.is_some(),
        }
    }

    fn status_panel(&self) -> StatusPanel {
        let values = self.store.values();
        let money = self.controller.selected_customer().map(|customer| MoneyPanel {
            customer: customer.name.to_string(),
            base_amount: format_amount(customer.base_amount),
            quantity: format_number(values.estimated_quantity),
            total: format_amount(self.controller.money_to_take(&self.store)),
        });
        StatusPanel {
            form_dirty: self.store.is_dirty(),
            address: address_summary(values, self.store.is_address_dirty()),
            contact_count: values.contacts.len(),
            newsletter: values.newsletter,
            money,
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let sections = self.section_views();
        let panel = self.status_panel();
        let title = if self.store.is_submitting() {
            format!("{TITLE} • Saving...")
        } else {
            TITLE.to_string()
        };
        let help = self.options.show_help.then_some(HELP_TEXT);
        let prompt = self.controller.pending().map(prompt_for);
        presentation::draw_form(
            frame,
            FormContext {
                title: &title,
                sections: &sections,
                focused: self.focus,
                panel: &panel,
                footer: FooterContext {
                    status_message: self.status.message(),
                    dirty: self.store.is_dirty(),
                    error_count: self.store.error_count(),
                    help,
                },
                popup: self.popup.as_ref().map(PopupState::as_render),
                prompt,
            },
        );
    }
}

fn admin_value(admin: &AdminCustomerDetails, field: AdminField) -> String {
    match field {
        AdminField::Name => admin.name.clone(),
        AdminField::Age => admin.age.to_string(),
        AdminField::Device => admin.device.clone(),
        AdminField::Email => admin.email.clone(),
    }
}

fn prompt_for(change: &PendingChange) -> PromptRender<'static> {
    match change {
        PendingChange::Country(_) => PromptRender {
            title: "Override Address?",
            message: "Changing the country will reset the state and city fields. Do you want to continue?",
            confirm_label: "OK",
        },
        PendingChange::Customer(_) => PromptRender {
            title: "Override Customer Details?",
            message: "Changing the customer will reset the form fields. Do you want to continue?",
            confirm_label: "OK",
        },
        PendingChange::Leave => PromptRender {
            title: "Unsaved Changes",
            message: "You have unsaved changes. Are you sure you want to leave?",
            confirm_label: "Leave",
        },
    }
}

#[cfg(test)]
impl FormApp {
    pub(crate) fn store_for_test(&self) -> &FormStore {
        &self.store
    }

    pub(crate) fn controller_for_test(&self) -> &DependencyController {
        &self.controller
    }

    pub(crate) fn focused_row_for_test(&self) -> Option<Row> {
        self.focused_row()
    }

    pub(crate) fn focus_for_test(&mut self, row: Row) {
        self.focus_row(row);
    }

    pub(crate) fn result_for_test(&self) -> Option<&FormValues> {
        self.result.as_ref()
    }

    pub(crate) fn should_quit_for_test(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn status_for_test(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn section_views_for_test(&self) -> Vec<SectionView> {
        self.section_views()
    }

    pub(crate) fn status_panel_for_test(&self) -> StatusPanel {
        self.status_panel()
    }
}
