use std::sync::LazyLock;

use anyhow::{Context, Result};
use jsonschema::{Validator, validator_for};
use regex::Regex;
use serde_json::Value;

use crate::domain::FormValues;

static INDEX_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("static regex"));

/// Field-level messages keyed by pointer pattern (`*` stands for a list index).
const MESSAGES: &[(&str, &str)] = &[
    ("/name", "Name is required"),
    ("/email", "Invalid email"),
    ("/age", "Must be at least 18"),
    ("/state", "State is required"),
    ("/city", "City is required"),
    ("/estimatedQuantity", "Quantity must be at least 0.0001"),
    ("/contacts/*/value", "Too short"),
    ("/contacts/*/type", "Type must be phone or email"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub pointer: String,
    pub message: String,
}

/// Compiled validation rules for [`FormValues`].
///
/// The JSON Schema is derived from the annotated value types and compiled once.
pub struct FormValidator {
    validator: Validator,
    schema: Value,
}

impl std::fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator").finish_non_exhaustive()
    }
}

impl FormValidator {
    pub fn new() -> Result<Self> {
        let schema = serde_json::to_value(schemars::schema_for!(FormValues))
            .context("failed to serialize form schema")?;
        let validator = validator_for(&schema).context("failed to compile form schema")?;
        Ok(Self { validator, schema })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn is_valid(&self, values: &FormValues) -> bool {
        self.issues(values).is_empty()
    }

    /// Every rule violation in `values`, in schema order.
    pub fn issues(&self, values: &FormValues) -> Vec<FieldIssue> {
        let instance = match serde_json::to_value(values) {
            Ok(instance) => instance,
            Err(err) => {
                return vec![FieldIssue {
                    pointer: String::new(),
                    message: format!("form values cannot be serialized: {err}"),
                }];
            }
        };
        self.validator
            .iter_errors(&instance)
            .map(|error| {
                let pointer = error.instance_path.to_string();
                let message = friendly_message(&pointer).unwrap_or_else(|| error.to_string());
                FieldIssue { pointer, message }
            })
            .collect()
    }

    /// Violations that belong to `pointer` only.
    pub fn issues_for(&self, values: &FormValues, pointer: &str) -> Vec<FieldIssue> {
        self.issues(values)
            .into_iter()
            .filter(|issue| issue.pointer == pointer)
            .collect()
    }
}

fn friendly_message(pointer: &str) -> Option<String> {
    let pattern = INDEX_SEGMENT.replace_all(pointer, "/*$1");
    MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == pattern)
        .map(|(_, message)| (*message).to_string())
}
