//! Resource paths, relative to the configured base url.

use std::fmt::Display;

pub mod users {
    use super::*;

    pub const LIST: &str = "/users";

    pub fn detail(id: impl Display) -> String {
        format!("{LIST}/{id}")
    }
}

pub mod posts {
    use super::*;

    pub const LIST: &str = "/posts";

    pub fn detail(id: impl Display) -> String {
        format!("{LIST}/{id}")
    }

    pub fn comments(post_id: impl Display) -> String {
        format!("{LIST}/{post_id}/comments")
    }
}

pub mod comments {
    use super::*;

    pub const LIST: &str = "/comments";

    pub fn detail(id: impl Display) -> String {
        format!("{LIST}/{id}")
    }
}

pub mod albums {
    use super::*;

    pub const LIST: &str = "/albums";

    pub fn detail(id: impl Display) -> String {
        format!("{LIST}/{id}")
    }
}

pub mod photos {
    use super::*;

    pub const LIST: &str = "/photos";

    pub fn detail(id: impl Display) -> String {
        format!("{LIST}/{id}")
    }
}

pub mod todos {
    use super::*;

    pub const LIST: &str = "/todos";

    pub fn detail(id: impl Display) -> String {
        format!("{LIST}/{id}")
    }
}
