//! Client-side cache of API query results.

mod cache;
pub mod customers;
mod key;
pub mod posts;
mod state;

pub use cache::QueryCache;
pub use key::{Operation, QueryKey, Resource};
pub use state::QueryState;
