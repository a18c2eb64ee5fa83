use crate::api::ApiError;

/// What a list view shows for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(ApiError),
    Success {
        data: T,
        /// A background refetch is running while cached data is shown.
        refreshing: bool,
    },
}

impl<T> QueryState<T> {
    /// Cached data wins over a fetch error; loading is shown only when there
    /// is nothing to display yet.
    pub fn resolve(data: Option<T>, fetching: bool, error: Option<&ApiError>) -> Self {
        match (data, error) {
            (Some(data), _) => QueryState::Success {
                data,
                refreshing: fetching,
            },
            (None, Some(error)) if !fetching => QueryState::Error(error.clone()),
            (None, _) => QueryState::Loading,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}
