//! REST client for the customer and posts backend.

mod cancel;
mod client;
mod config;
pub mod endpoints;
mod error;
mod resources;
mod transport;
mod types;

pub use cancel::{CancelHandle, CancelSignal};
pub use client::{ApiClient, RequestOptions};
pub use config::{
    ApiConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT, ENV_BASE_URL, ENV_RETRIES,
    ENV_TIMEOUT,
};
pub use error::{ApiError, ApiErrorKind};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError,
};
pub use types::{
    Address, Album, Comment, CreatePost, Geo, ListParams, Photo, Post, Todo, UpdatePost, User,
    UserCompany,
};
