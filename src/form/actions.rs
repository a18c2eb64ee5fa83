use crate::domain::AdminCustomerDetails;

use super::field::{FieldKey, FieldValue};

#[derive(Debug, Clone)]
pub enum FormCommand {
    /// A user edit of one field.
    Edit {
        key: FieldKey,
        value: FieldValue,
    },
    /// Focus left `key`; its errors are refreshed.
    Blur(FieldKey),
    SelectCustomer(Option<String>),
    EditAdminDetails(AdminCustomerDetails),
    AddContact,
    RemoveContact(usize),
    ConfirmPending,
    CancelPending,
    RequestLeave,
    Reset,
}

/// What the screen has to do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    None,
    ConfirmationRequired,
    Leave,
}
