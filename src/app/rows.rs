//! Which rows the form screen shows, grouped by section.

use crate::{
    controller::DependencyController,
    form::{FieldKey, FormStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdminField {
    Name,
    Age,
    Device,
    Email,
}

impl AdminField {
    pub(crate) const ALL: [AdminField; 4] = [
        AdminField::Name,
        AdminField::Age,
        AdminField::Device,
        AdminField::Email,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            AdminField::Name => "Name",
            AdminField::Age => "Age",
            AdminField::Device => "Device Bought",
            AdminField::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Row {
    Customer,
    Field(FieldKey),
    AddContact,
    Admin(AdminField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowKind {
    Text,
    Numeric,
    Select,
    Toggle,
    Action,
}

impl Row {
    pub(crate) fn kind(self) -> RowKind {
        match self {
            Row::Customer => RowKind::Select,
            Row::AddContact => RowKind::Action,
            Row::Admin(AdminField::Age) => RowKind::Numeric,
            Row::Admin(_) => RowKind::Text,
            Row::Field(key) => match key {
                FieldKey::Country | FieldKey::State | FieldKey::City | FieldKey::ContactType(_) => {
                    RowKind::Select
                }
                FieldKey::Newsletter => RowKind::Toggle,
                FieldKey::Age | FieldKey::EstimatedQuantity => RowKind::Numeric,
                _ => RowKind::Text,
            },
        }
    }

    pub(crate) fn label(self) -> String {
        match self {
            Row::Customer => "Existing Customer".to_string(),
            Row::AddContact => "+ Add Contact".to_string(),
            Row::Admin(field) => field.label().to_string(),
            Row::Field(key) => key.label(),
        }
    }

    pub(crate) fn field_key(self) -> Option<FieldKey> {
        match self {
            Row::Field(key) => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SectionLayout {
    pub(crate) title: &'static str,
    pub(crate) rows: Vec<Row>,
}

/// Company fields only show with the newsletter on; the admin copy only
/// with a customer selected.
pub(crate) fn layout(store: &FormStore, controller: &DependencyController) -> Vec<SectionLayout> {
    let values = store.values();
    let mut sections = vec![
        SectionLayout {
            title: "Existing Customers",
            rows: vec![Row::Customer],
        },
        SectionLayout {
            title: "Basic Information",
            rows: vec![
                Row::Field(FieldKey::Name),
                Row::Field(FieldKey::Email),
                Row::Field(FieldKey::Age),
                Row::Field(FieldKey::EstimatedQuantity),
            ],
        },
        SectionLayout {
            title: "Address Information",
            rows: vec![
                Row::Field(FieldKey::Country),
                Row::Field(FieldKey::State),
                Row::Field(FieldKey::City),
            ],
        },
        SectionLayout {
            title: "Newsletter",
            rows: vec![Row::Field(FieldKey::Newsletter)],
        },
    ];
    if values.newsletter {
        sections.push(SectionLayout {
            title: "Company Information",
            rows: vec![
                Row::Field(FieldKey::CompanyName),
                Row::Field(FieldKey::CompanyRole),
            ],
        });
    }

    let mut contacts = Vec::with_capacity(values.contacts.len() * 2 + 1);
    for index in 0..values.contacts.len() {
        contacts.push(Row::Field(FieldKey::ContactType(index)));
        contacts.push(Row::Field(FieldKey::ContactValue(index)));
    }
    contacts.push(Row::AddContact);
    sections.push(SectionLayout {
        title: "Contact Information",
        rows: contacts,
    });

    if controller.selected_customer().is_some() {
        sections.push(SectionLayout {
            title: "Admin Support",
            rows: AdminField::ALL.into_iter().map(Row::Admin).collect(),
        });
    }
    sections
}

pub(crate) fn flatten(sections: &[SectionLayout]) -> Vec<Row> {
    sections
        .iter()
        .flat_map(|section| section.rows.iter().copied())
        .collect()
}
