//! Cache keys and mutation patches for posts.

use anyhow::Result;

use crate::api::{ListParams, Post};

use super::{
    cache::QueryCache,
    key::{Operation, QueryKey, Resource},
};

pub fn list_key(params: &ListParams) -> QueryKey {
    QueryKey::list(Resource::Posts, params)
}

pub fn detail_key(id: u64) -> QueryKey {
    QueryKey::detail(Resource::Posts, id)
}

fn default_list_key() -> QueryKey {
    list_key(&ListParams::default())
}

/// A created post goes to the front of the unpaged list.
pub fn on_create(cache: &mut QueryCache, post: &Post) -> Result<()> {
    tracing::debug!(id = post.id, "posts cache: created");
    cache.update::<Vec<Post>, _>(default_list_key(), |current| {
        let mut posts = current.unwrap_or_default();
        posts.insert(0, post.clone());
        Some(posts)
    })
}

/// A replaced post swaps in place and becomes the detail entry.
pub fn on_update(cache: &mut QueryCache, post: &Post) -> Result<()> {
    tracing::debug!(id = post.id, "posts cache: updated");
    cache.update::<Vec<Post>, _>(default_list_key(), |current| {
        current.map(|posts| {
            posts
                .into_iter()
                .map(|existing| {
                    if existing.id == post.id {
                        post.clone()
                    } else {
                        existing
                    }
                })
                .collect()
        })
    })?;
    cache.set(detail_key(post.id), post)
}

/// Partial updates are refetched rather than merged.
pub fn on_patch(cache: &mut QueryCache, id: u64) {
    tracing::debug!(id, "posts cache: patched");
    cache.invalidate(Resource::Posts, Some(Operation::List));
    cache.invalidate_key(&detail_key(id));
}

pub fn on_delete(cache: &mut QueryCache, id: u64) -> Result<()> {
    tracing::debug!(id, "posts cache: deleted");
    cache.update::<Vec<Post>, _>(default_list_key(), |current| {
        current.map(|posts| posts.into_iter().filter(|post| post.id != id).collect())
    })?;
    cache.remove(&detail_key(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("title {id}"),
            body: format!("body {id}"),
            user_id: 1,
        }
    }

    fn seeded() -> QueryCache {
        let mut cache = QueryCache::new();
        cache
            .set(default_list_key(), &vec![post(1), post(2), post(3)])
            .expect("seed list");
        cache.set(detail_key(2), &post(2)).expect("seed detail");
        cache
    }

    fn ids(cache: &QueryCache) -> Vec<u64> {
        cache
            .get::<Vec<Post>>(&default_list_key())
            .unwrap_or_default()
            .iter()
            .map(|post| post.id)
            .collect()
    }

    #[test]
    fn delete_removes_exactly_the_id() {
        let mut cache = seeded();
        on_delete(&mut cache, 2).expect("delete");
        assert_eq!(ids(&cache), vec![1, 3]);
        assert!(!cache.contains(&detail_key(2)));
    }

    #[test]
    fn create_prepends_and_seeds_missing_list() {
        let mut cache = seeded();
        on_create(&mut cache, &post(101)).expect("create");
        assert_eq!(ids(&cache), vec![101, 1, 2, 3]);

        let mut empty = QueryCache::new();
        on_create(&mut empty, &post(101)).expect("create");
        assert_eq!(ids(&empty), vec![101]);
    }

    #[test]
    fn update_replaces_in_list_and_detail() {
        let mut cache = seeded();
        let mut edited = post(3);
        edited.title = "edited".into();
        on_update(&mut cache, &edited).expect("update");
        let list = cache.get::<Vec<Post>>(&default_list_key()).expect("list");
        assert_eq!(list[2].title, "edited");
        assert_eq!(cache.get::<Post>(&detail_key(3)), Some(edited));
    }

    #[test]
    fn update_and_delete_do_not_invent_a_list() {
        let mut cache = QueryCache::new();
        on_update(&mut cache, &post(4)).expect("update");
        assert!(!cache.contains(&default_list_key()));
        assert_eq!(cache.get::<Post>(&detail_key(4)), Some(post(4)));

        on_delete(&mut cache, 4).expect("delete");
        assert!(!cache.contains(&default_list_key()));
        assert!(!cache.contains(&detail_key(4)));
    }

    #[test]
    fn patch_invalidates_lists_and_detail() {
        let mut cache = seeded();
        let paged = list_key(&ListParams {
            limit: Some(10),
            skip: None,
        });
        cache.set(paged.clone(), &vec![post(1)]).expect("seed paged");
        on_patch(&mut cache, 2);
        assert!(cache.is_stale(&default_list_key()));
        assert!(cache.is_stale(&paged));
        assert!(cache.is_stale(&detail_key(2)));
        assert_eq!(ids(&cache), vec![1, 2, 3]);
    }
}
