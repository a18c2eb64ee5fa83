mod actions;
mod error;
mod field;
mod reducers;
mod schema;
mod state;
mod validation;

pub use actions::{CommandEffect, FormCommand};
pub use error::FieldCoercionError;
pub use field::{Dirty, FieldKey, FieldValue, format_number};
pub use reducers::FormEngine;
pub use schema::{FieldIssue, FormValidator};
pub use state::FormStore;
pub use validation::{ValidationOutcome, validate_field, validate_form};
