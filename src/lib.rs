#![deny(rust_2018_idioms)]

pub mod api;
mod app;
pub mod controller;
pub mod domain;
pub mod form;
mod presentation;
pub mod query;

#[cfg(test)]
mod tests;

pub use app::{CustomerForm, CustomersView, PostsView, SubmitHandler, UiOptions};

pub mod prelude {
    pub use super::{
        CustomerForm, CustomersView, PostsView, UiOptions,
        api::{ApiClient, ApiConfig, ApiError, ApiErrorKind},
        domain::FormValues,
    };
}
