use std::fmt;

use crate::domain::ContactType;

/// Addressable input of the customer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Name,
    Email,
    Age,
    Country,
    State,
    City,
    EstimatedQuantity,
    Newsletter,
    CompanyName,
    CompanyRole,
    /// The contact list itself (entries added or removed).
    Contacts,
    ContactType(usize),
    ContactValue(usize),
}

impl FieldKey {
    /// JSON pointer of the field inside the serialized form values.
    pub fn pointer(self) -> String {
        match self {
            FieldKey::Name => "/name".to_string(),
            FieldKey::Email => "/email".to_string(),
            FieldKey::Age => "/age".to_string(),
            FieldKey::Country => "/country".to_string(),
            FieldKey::State => "/state".to_string(),
            FieldKey::City => "/city".to_string(),
            FieldKey::EstimatedQuantity => "/estimatedQuantity".to_string(),
            FieldKey::Newsletter => "/newsletter".to_string(),
            FieldKey::CompanyName => "/company/name".to_string(),
            FieldKey::CompanyRole => "/company/role".to_string(),
            FieldKey::Contacts => "/contacts".to_string(),
            FieldKey::ContactType(index) => format!("/contacts/{index}/type"),
            FieldKey::ContactValue(index) => format!("/contacts/{index}/value"),
        }
    }

    pub fn label(self) -> String {
        match self {
            FieldKey::Name => "Full Name".to_string(),
            FieldKey::Email => "Email Address".to_string(),
            FieldKey::Age => "Age".to_string(),
            FieldKey::Country => "Country".to_string(),
            FieldKey::State => "State".to_string(),
            FieldKey::City => "City".to_string(),
            FieldKey::EstimatedQuantity => "Estimated Quantity".to_string(),
            FieldKey::Newsletter => "Subscribe to Newsletter".to_string(),
            FieldKey::CompanyName => "Company Name".to_string(),
            FieldKey::CompanyRole => "Role".to_string(),
            FieldKey::Contacts => "Contacts".to_string(),
            FieldKey::ContactType(index) => format!("Contact #{} Type", index + 1),
            FieldKey::ContactValue(index) => format!("Contact #{} Value", index + 1),
        }
    }

    pub fn contact_index(self) -> Option<usize> {
        match self {
            FieldKey::ContactType(index) | FieldKey::ContactValue(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_address(self) -> bool {
        matches!(self, FieldKey::State | FieldKey::City)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pointer())
    }
}

/// Value written into (or read out of) a single form field.
///
/// `Text` is accepted by every field: numeric fields parse it and report a
/// coercion error when it does not parse.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u32),
    Number(f64),
    Bool(bool),
    ContactType(ContactType),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Number(value) => format_number(*value),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::ContactType(kind) => kind.label().to_string(),
        }
    }
}

/// Renders whole numbers without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// How a programmatic write treats the field's dirty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dirty {
    /// User edit: the field becomes dirty.
    Mark,
    /// Auto-population: the field is left not dirty.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointers_match_serialized_keys() {
        assert_eq!(FieldKey::EstimatedQuantity.pointer(), "/estimatedQuantity");
        assert_eq!(FieldKey::CompanyRole.pointer(), "/company/role");
        assert_eq!(FieldKey::ContactValue(2).pointer(), "/contacts/2/value");
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(200_000.0), "200000");
    }
}
