use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Customers,
    Posts,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Customers => "customers",
            Resource::Posts => "posts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Detail,
}

/// Cache address: `[resource, operation, params]`.
///
/// Params are kept in their canonical JSON form so that equal parameter sets
/// address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub operation: Operation,
    pub params: String,
}

impl QueryKey {
    pub fn list(resource: Resource, params: &impl Serialize) -> Self {
        let params = serde_json::to_string(params).unwrap_or_else(|err| {
            tracing::warn!(%err, "query params could not be encoded");
            String::from("null")
        });
        Self {
            resource,
            operation: Operation::List,
            params,
        }
    }

    pub fn detail(resource: Resource, id: impl fmt::Display) -> Self {
        Self {
            resource,
            operation: Operation::Detail,
            params: id.to_string(),
        }
    }

    /// True when this key lies under the `[resource]` or
    /// `[resource, operation]` prefix.
    pub fn starts_with(&self, resource: Resource, operation: Option<Operation>) -> bool {
        self.resource == resource && operation.is_none_or(|operation| self.operation == operation)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation = match self.operation {
            Operation::List => "list",
            Operation::Detail => "detail",
        };
        write!(f, "[{}, {operation}, {}]", self.resource.as_str(), self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ListParams;

    #[test]
    fn equal_params_share_a_key() {
        let a = QueryKey::list(Resource::Posts, &ListParams::default());
        let b = QueryKey::list(Resource::Posts, &ListParams::default());
        assert_eq!(a, b);
        assert_eq!(a.params, "{}");
        let paged = QueryKey::list(
            Resource::Posts,
            &ListParams {
                limit: Some(10),
                skip: Some(20),
            },
        );
        assert_ne!(a, paged);
        assert_eq!(paged.to_string(), r#"[posts, list, {"limit":10,"skip":20}]"#);
    }

    #[test]
    fn prefixes_match_by_resource_and_operation() {
        let key = QueryKey::detail(Resource::Posts, 7);
        assert!(key.starts_with(Resource::Posts, None));
        assert!(key.starts_with(Resource::Posts, Some(Operation::Detail)));
        assert!(!key.starts_with(Resource::Posts, Some(Operation::List)));
        assert!(!key.starts_with(Resource::Customers, None));
    }
}
