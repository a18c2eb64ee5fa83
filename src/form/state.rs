use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Contact, ContactType, FormValues};

use super::{
    error::FieldCoercionError,
    field::{Dirty, FieldKey, FieldValue},
};

/// Owns the form values together with their dirty flags and errors.
///
/// Every mutation goes through [`FormStore::set_value`] (or the contact list
/// helpers) and states how the field's dirty flag is treated.
#[derive(Debug, Clone)]
pub struct FormStore {
    values: FormValues,
    baseline: FormValues,
    dirty: BTreeSet<FieldKey>,
    errors: BTreeMap<String, String>,
    invalid_inputs: BTreeMap<String, FieldCoercionError>,
    submitting: bool,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(FormValues::default())
    }
}

impl FormStore {
    pub fn new(values: FormValues) -> Self {
        Self {
            baseline: values.clone(),
            values,
            dirty: BTreeSet::new(),
            errors: BTreeMap::new(),
            invalid_inputs: BTreeMap::new(),
            submitting: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn baseline(&self) -> &FormValues {
        &self.baseline
    }

    /// Replaces values and baseline, dropping dirty flags and errors.
    pub fn load(&mut self, values: FormValues) {
        *self = Self::new(values);
    }

    /// Restores the baseline, dropping dirty flags and errors.
    pub fn reset(&mut self) {
        let baseline = self.baseline.clone();
        self.load(baseline);
    }

    /// Current value of `key`, or `None` for a contact index that does not exist.
    pub fn value(&self, key: FieldKey) -> Option<FieldValue> {
        let values = &self.values;
        let value = match key {
            FieldKey::Name => FieldValue::Text(values.name.clone()),
            FieldKey::Email => FieldValue::Text(values.email.clone()),
            FieldKey::Age => FieldValue::Integer(values.age),
            FieldKey::Country => FieldValue::Text(values.country.clone()),
            FieldKey::State => FieldValue::Text(values.state.clone()),
            FieldKey::City => FieldValue::Text(values.city.clone()),
            FieldKey::EstimatedQuantity => FieldValue::Number(values.estimated_quantity),
            FieldKey::Newsletter => FieldValue::Bool(values.newsletter),
            FieldKey::CompanyName => FieldValue::Text(values.company.name.clone()),
            FieldKey::CompanyRole => FieldValue::Text(values.company.role.clone()),
            FieldKey::Contacts => FieldValue::Integer(values.contacts.len() as u32),
            FieldKey::ContactType(index) => {
                FieldValue::ContactType(values.contacts.get(index)?.kind)
            }
            FieldKey::ContactValue(index) => {
                FieldValue::Text(values.contacts.get(index)?.value.clone())
            }
        };
        Some(value)
    }

    /// Writes `value` into `key` and sets the dirty flag as requested.
    ///
    /// Text written into a numeric field is parsed; when parsing fails the
    /// stored value is kept, the raw input is remembered as invalid and the
    /// error is returned. The dirty flag is still updated for user edits.
    pub fn set_value(
        &mut self,
        key: FieldKey,
        value: FieldValue,
        dirty: Dirty,
    ) -> Result<(), FieldCoercionError> {
        let pointer = key.pointer();
        let result = self.write(key, value);
        match &result {
            Ok(()) => {
                self.invalid_inputs.remove(&pointer);
            }
            Err(err) => {
                self.invalid_inputs.insert(pointer, err.clone());
            }
        }
        if result.is_ok() || dirty == Dirty::Mark {
            self.mark(key, dirty);
        }
        result
    }

    fn write(&mut self, key: FieldKey, value: FieldValue) -> Result<(), FieldCoercionError> {
        let pointer = key.pointer();
        let values = &mut self.values;
        match key {
            FieldKey::Name => values.name = expect_text(&pointer, value)?,
            FieldKey::Email => values.email = expect_text(&pointer, value)?,
            FieldKey::Country => values.country = expect_text(&pointer, value)?,
            FieldKey::State => values.state = expect_text(&pointer, value)?,
            FieldKey::City => values.city = expect_text(&pointer, value)?,
            FieldKey::CompanyName => values.company.name = expect_text(&pointer, value)?,
            FieldKey::CompanyRole => values.company.role = expect_text(&pointer, value)?,
            FieldKey::Age => values.age = coerce_integer(&pointer, value)?,
            FieldKey::EstimatedQuantity => {
                values.estimated_quantity = coerce_number(&pointer, value)?
            }
            FieldKey::Newsletter => match value {
                FieldValue::Bool(flag) => values.newsletter = flag,
                other => return Err(mismatch(&pointer, "a boolean", &other)),
            },
            FieldKey::Contacts => {
                return Err(FieldCoercionError::new(
                    pointer,
                    "contacts are edited through add/remove",
                ));
            }
            FieldKey::ContactType(index) => {
                let kind = match value {
                    FieldValue::ContactType(kind) => kind,
                    FieldValue::Text(raw) => parse_contact_type(&pointer, &raw)?,
                    other => return Err(mismatch(&pointer, "a contact type", &other)),
                };
                contact_mut(values, index, &pointer)?.kind = kind;
            }
            FieldKey::ContactValue(index) => {
                let text = expect_text(&pointer, value)?;
                contact_mut(values, index, &pointer)?.value = text;
            }
        }
        Ok(())
    }

    fn mark(&mut self, key: FieldKey, dirty: Dirty) {
        match dirty {
            Dirty::Mark => {
                self.dirty.insert(key);
            }
            Dirty::Clear => {
                self.dirty.remove(&key);
            }
        }
    }

    pub fn add_contact(&mut self) -> usize {
        self.values.contacts.push(Contact {
            kind: ContactType::Phone,
            value: String::new(),
        });
        self.dirty.insert(FieldKey::Contacts);
        self.values.contacts.len() - 1
    }

    /// Removes the contact at `index`; later contacts shift down one slot
    /// together with their dirty flags and errors.
    pub fn remove_contact(&mut self, index: usize) -> bool {
        if index >= self.values.contacts.len() {
            return false;
        }
        self.values.contacts.remove(index);
        self.dirty.insert(FieldKey::Contacts);

        let shifted: BTreeSet<FieldKey> = self
            .dirty
            .iter()
            .filter_map(|key| shift_contact_key(*key, index))
            .collect();
        self.dirty = shifted;

        let errors = std::mem::take(&mut self.errors);
        self.errors = errors
            .into_iter()
            .filter_map(|(pointer, message)| {
                shift_contact_pointer(&pointer, index).map(|pointer| (pointer, message))
            })
            .collect();
        let invalid = std::mem::take(&mut self.invalid_inputs);
        self.invalid_inputs = invalid
            .into_iter()
            .filter_map(|(pointer, mut err)| {
                let pointer = shift_contact_pointer(&pointer, index)?;
                err.pointer = pointer.clone();
                Some((pointer, err))
            })
            .collect();
        true
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_field_dirty(&self, key: FieldKey) -> bool {
        self.dirty.contains(&key)
    }

    pub fn dirty_fields(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.dirty.iter().copied()
    }

    /// State or city was edited by the user.
    pub fn is_address_dirty(&self) -> bool {
        self.dirty.iter().any(|key| key.is_address())
    }

    /// Accepts the current values as the new baseline.
    pub fn mark_clean(&mut self) {
        self.baseline = self.values.clone();
        self.dirty.clear();
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Records `message` against `pointer`; returns false when the pointer does
    /// not address a form field.
    pub fn set_error(&mut self, pointer: &str, message: String) -> bool {
        if !self.is_known_pointer(pointer) {
            return false;
        }
        self.errors.insert(pointer.to_string(), message);
        true
    }

    pub fn clear_error(&mut self, pointer: &str) {
        self.errors.remove(pointer);
    }

    pub fn error(&self, key: FieldKey) -> Option<&str> {
        self.errors.get(&key.pointer()).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(pointer, message)| (pointer.as_str(), message.as_str()))
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn invalid_input(&self, pointer: &str) -> Option<&FieldCoercionError> {
        self.invalid_inputs.get(pointer)
    }

    pub fn first_invalid_input(&self) -> Option<&FieldCoercionError> {
        self.invalid_inputs.values().next()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Raises the submitting flag and hands out the values to submit.
    pub fn begin_submit(&mut self) -> FormValues {
        self.submitting = true;
        self.values.clone()
    }

    /// Lowers the submitting flag; a successful submission becomes the new
    /// baseline.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.mark_clean();
        }
    }

    fn is_known_pointer(&self, pointer: &str) -> bool {
        self.field_keys().any(|key| key.pointer() == pointer)
    }

    /// Every key currently addressable, contacts included.
    pub fn field_keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        const FIXED: [FieldKey; 11] = [
            FieldKey::Name,
            FieldKey::Email,
            FieldKey::Age,
            FieldKey::Country,
            FieldKey::State,
            FieldKey::City,
            FieldKey::EstimatedQuantity,
            FieldKey::Newsletter,
            FieldKey::CompanyName,
            FieldKey::CompanyRole,
            FieldKey::Contacts,
        ];
        FIXED.into_iter().chain(
            (0..self.values.contacts.len())
                .flat_map(|index| [FieldKey::ContactType(index), FieldKey::ContactValue(index)]),
        )
    }
}

fn expect_text(pointer: &str, value: FieldValue) -> Result<String, FieldCoercionError> {
    match value {
        FieldValue::Text(text) => Ok(text),
        other => Err(mismatch(pointer, "text", &other)),
    }
}

fn coerce_integer(pointer: &str, value: FieldValue) -> Result<u32, FieldCoercionError> {
    match value {
        FieldValue::Integer(number) => Ok(number),
        FieldValue::Text(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| FieldCoercionError::new(pointer, format!("'{}' is not a whole number", raw.trim()))),
        other => Err(mismatch(pointer, "a whole number", &other)),
    }
}

fn coerce_number(pointer: &str, value: FieldValue) -> Result<f64, FieldCoercionError> {
    let number = match value {
        FieldValue::Number(number) => number,
        FieldValue::Integer(number) => f64::from(number),
        FieldValue::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| FieldCoercionError::new(pointer, format!("'{}' is not a number", raw.trim())))?,
        other => return Err(mismatch(pointer, "a number", &other)),
    };
    if number.is_finite() {
        Ok(number)
    } else {
        Err(FieldCoercionError::new(pointer, "value must be a finite number"))
    }
}

fn parse_contact_type(pointer: &str, raw: &str) -> Result<ContactType, FieldCoercionError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "phone" => Ok(ContactType::Phone),
        "email" => Ok(ContactType::Email),
        other => Err(FieldCoercionError::new(
            pointer,
            format!("'{other}' is not a contact type (phone, email)"),
        )),
    }
}

fn contact_mut<'a>(
    values: &'a mut FormValues,
    index: usize,
    pointer: &str,
) -> Result<&'a mut Contact, FieldCoercionError> {
    values
        .contacts
        .get_mut(index)
        .ok_or_else(|| FieldCoercionError::new(pointer, format!("no contact at index {index}")))
}

fn mismatch(pointer: &str, expected: &str, got: &FieldValue) -> FieldCoercionError {
    FieldCoercionError::new(pointer, format!("expected {expected}, got {got:?}"))
}

fn shift_contact_key(key: FieldKey, removed: usize) -> Option<FieldKey> {
    let shift = |index: usize| -> Option<usize> {
        match index.cmp(&removed) {
            std::cmp::Ordering::Less => Some(index),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(index - 1),
        }
    };
    match key {
        FieldKey::ContactType(index) => shift(index).map(FieldKey::ContactType),
        FieldKey::ContactValue(index) => shift(index).map(FieldKey::ContactValue),
        other => Some(other),
    }
}

fn shift_contact_pointer(pointer: &str, removed: usize) -> Option<String> {
    let Some(rest) = pointer.strip_prefix("/contacts/") else {
        return Some(pointer.to_string());
    };
    let (index, tail) = rest.split_once('/').unwrap_or((rest, ""));
    let Ok(index) = index.parse::<usize>() else {
        return Some(pointer.to_string());
    };
    let index = match index.cmp(&removed) {
        std::cmp::Ordering::Less => index,
        std::cmp::Ordering::Equal => return None,
        std::cmp::Ordering::Greater => index - 1,
    };
    if tail.is_empty() {
        Some(format!("/contacts/{index}"))
    } else {
        Some(format!("/contacts/{index}/{tail}"))
    }
}
