mod customer_form;
mod form_screen;
pub(crate) mod input;
pub(crate) mod lists;
mod options;
pub(crate) mod popup;
pub(crate) mod rows;
mod status;
mod terminal;

pub use customer_form::CustomerForm;
pub use form_screen::SubmitHandler;
pub use lists::{CustomersView, PostsView};
pub use options::UiOptions;

#[cfg(test)]
pub(crate) use form_screen::FormApp;
