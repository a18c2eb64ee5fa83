use crate::domain::FormValues;

use super::{field::FieldKey, schema::FormValidator, state::FormStore};

#[derive(Debug)]
pub enum ValidationOutcome {
    Valid(FormValues),
    Invalid {
        issues: usize,
        global_errors: Vec<String>,
    },
    BuildError {
        message: String,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

/// Full validation, as run on submit: every field error is refreshed.
pub fn validate_form(store: &mut FormStore, validator: &FormValidator) -> ValidationOutcome {
    store.clear_errors();
    if let Some(err) = store.first_invalid_input().cloned() {
        store.set_error(&err.pointer, err.message.clone());
        return ValidationOutcome::BuildError {
            message: err.message,
        };
    }

    let issues = validator.issues(store.values());
    if issues.is_empty() {
        return ValidationOutcome::Valid(store.values().clone());
    }

    let mut global = Vec::new();
    for issue in &issues {
        if !store.set_error(&issue.pointer, issue.message.clone()) {
            let prefix = if issue.pointer.is_empty() {
                "<root>".to_string()
            } else {
                issue.pointer.clone()
            };
            global.push(format!("{prefix}: {}", issue.message));
        }
    }
    ValidationOutcome::Invalid {
        issues: issues.len(),
        global_errors: global,
    }
}

/// Blur validation: only the errors of `key` are refreshed.
pub fn validate_field(
    store: &mut FormStore,
    validator: &FormValidator,
    key: FieldKey,
) -> Result<(), String> {
    let pointer = key.pointer();
    store.clear_error(&pointer);
    if let Some(err) = store.invalid_input(&pointer).cloned() {
        store.set_error(&pointer, err.message.clone());
        return Err(err.message);
    }
    let issues = validator.issues_for(store.values(), &pointer);
    match issues.into_iter().next() {
        Some(issue) => {
            store.set_error(&pointer, issue.message.clone());
            Err(issue.message)
        }
        None => Ok(()),
    }
}
