pub mod lookup;
mod values;

pub use lookup::SelectOption;
pub use values::{
    AdminCustomerDetails, Company, Contact, ContactType, DEFAULT_AGE, DEFAULT_ESTIMATED_QUANTITY,
    ExistingCustomer, FormValues,
};
