use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    Phone,
    Email,
}

impl ContactType {
    pub const ALL: [ContactType; 2] = [ContactType::Phone, ContactType::Email];

    pub fn label(self) -> &'static str {
        match self {
            ContactType::Phone => "Phone",
            ContactType::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Contact {
    #[serde(rename = "type")]
    pub kind: ContactType,
    #[schemars(length(min = 5))]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub role: String,
}

/// Values collected by the customer registration form.
///
/// The `schemars` attributes are the validation rules: the generated JSON
/// Schema is what the form validator compiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    #[schemars(length(min = 2))]
    pub name: String,
    #[schemars(regex(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))]
    pub email: String,
    #[schemars(range(min = 18))]
    pub age: u32,
    pub country: String,
    #[schemars(length(min = 1))]
    pub state: String,
    #[schemars(length(min = 1))]
    pub city: String,
    #[schemars(range(min = 0.0001))]
    pub estimated_quantity: f64,
    pub newsletter: bool,
    pub company: Company,
    pub contacts: Vec<Contact>,
}

pub const DEFAULT_AGE: u32 = 18;
pub const DEFAULT_ESTIMATED_QUANTITY: f64 = 1.0;

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            age: DEFAULT_AGE,
            country: String::new(),
            state: String::new(),
            city: String::new(),
            estimated_quantity: DEFAULT_ESTIMATED_QUANTITY,
            newsletter: false,
            company: Company::default(),
            contacts: Vec::new(),
        }
    }
}

/// Operator-editable shadow copy of the selected customer's record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminCustomerDetails {
    pub name: String,
    pub age: u32,
    pub device: String,
    pub email: String,
}

impl AdminCustomerDetails {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_customer(customer: &ExistingCustomer) -> Self {
        Self {
            name: customer.name.to_string(),
            age: customer.age,
            device: customer.device.to_string(),
            email: customer.email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExistingCustomer {
    pub id: &'static str,
    pub name: &'static str,
    pub age: u32,
    pub device: &'static str,
    pub email: &'static str,
    pub base_amount: f64,
}
