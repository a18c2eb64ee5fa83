//! Typed calls for every backend resource.

use serde_json::Value;

use super::{
    client::{ApiClient, RequestOptions},
    endpoints,
    error::ApiError,
    types::{Album, Comment, CreatePost, ListParams, Photo, Post, Todo, UpdatePost, User},
};

impl ApiClient {
    pub async fn get_users(
        &self,
        params: &ListParams,
        options: RequestOptions,
    ) -> Result<Vec<User>, ApiError> {
        self.get(endpoints::users::LIST, &params.to_query(), options)
            .await
    }

    pub async fn get_user(&self, id: u64, options: RequestOptions) -> Result<User, ApiError> {
        self.get(&endpoints::users::detail(id), &[], options).await
    }

    pub async fn get_posts(
        &self,
        params: &ListParams,
        options: RequestOptions,
    ) -> Result<Vec<Post>, ApiError> {
        self.get(endpoints::posts::LIST, &params.to_query(), options)
            .await
    }

    pub async fn get_post(&self, id: u64, options: RequestOptions) -> Result<Post, ApiError> {
        self.get(&endpoints::posts::detail(id), &[], options).await
    }

    pub async fn create_post(
        &self,
        request: &CreatePost,
        options: RequestOptions,
    ) -> Result<Post, ApiError> {
        self.post(endpoints::posts::LIST, request, options).await
    }

    /// Full replacement (PUT).
    pub async fn update_post(
        &self,
        id: u64,
        request: &UpdatePost,
        options: RequestOptions,
    ) -> Result<Post, ApiError> {
        self.put(&endpoints::posts::detail(id), request, options)
            .await
    }

    /// Partial update (PATCH).
    pub async fn patch_post(
        &self,
        id: u64,
        request: &UpdatePost,
        options: RequestOptions,
    ) -> Result<Post, ApiError> {
        self.patch(&endpoints::posts::detail(id), request, options)
            .await
    }

    pub async fn delete_post(&self, id: u64, options: RequestOptions) -> Result<(), ApiError> {
        let _: Value = self.delete(&endpoints::posts::detail(id), options).await?;
        Ok(())
    }

    pub async fn get_post_comments(
        &self,
        post_id: u64,
        options: RequestOptions,
    ) -> Result<Vec<Comment>, ApiError> {
        self.get(&endpoints::posts::comments(post_id), &[], options)
            .await
    }

    pub async fn get_comments(&self, options: RequestOptions) -> Result<Vec<Comment>, ApiError> {
        self.get(endpoints::comments::LIST, &[], options).await
    }

    pub async fn get_comment(&self, id: u64, options: RequestOptions) -> Result<Comment, ApiError> {
        self.get(&endpoints::comments::detail(id), &[], options)
            .await
    }

    pub async fn get_albums(&self, options: RequestOptions) -> Result<Vec<Album>, ApiError> {
        self.get(endpoints::albums::LIST, &[], options).await
    }

    pub async fn get_album(&self, id: u64, options: RequestOptions) -> Result<Album, ApiError> {
        self.get(&endpoints::albums::detail(id), &[], options).await
    }

    pub async fn get_photos(&self, options: RequestOptions) -> Result<Vec<Photo>, ApiError> {
        self.get(endpoints::photos::LIST, &[], options).await
    }

    pub async fn get_photo(&self, id: u64, options: RequestOptions) -> Result<Photo, ApiError> {
        self.get(&endpoints::photos::detail(id), &[], options).await
    }

    pub async fn get_todos(&self, options: RequestOptions) -> Result<Vec<Todo>, ApiError> {
        self.get(endpoints::todos::LIST, &[], options).await
    }

    pub async fn get_todo(&self, id: u64, options: RequestOptions) -> Result<Todo, ApiError> {
        self.get(&endpoints::todos::detail(id), &[], options).await
    }
}
