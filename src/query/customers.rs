//! Cache keys for customers.

use crate::api::ListParams;

use super::key::{QueryKey, Resource};

pub fn list_key(params: &ListParams) -> QueryKey {
    QueryKey::list(Resource::Customers, params)
}

pub fn detail_key(id: u64) -> QueryKey {
    QueryKey::detail(Resource::Customers, id)
}
