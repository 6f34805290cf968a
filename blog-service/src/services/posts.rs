use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::Post,
    services::{ServiceError, store::PostStore},
    utils::validation::is_blank_markup,
};

/// Post CRUD plus the ownership gate for mutating operations.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        self.posts
            .list_newest_first()
            .await
            .map_err(ServiceError::Store)
    }

    pub async fn get(&self, id: &str) -> Result<Post, ServiceError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(ServiceError::Store)?
            .ok_or(ServiceError::PostNotFound)
    }

    pub async fn create(
        &self,
        title: String,
        content: String,
        author_id: String,
    ) -> Result<Post, ServiceError> {
        validate_post_fields(&title, &content)?;

        let post = Post::new(title, content, author_id);
        self.posts
            .insert(&post)
            .await
            .map_err(ServiceError::Store)?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");

        Ok(post)
    }

    pub async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        caller_id: &str,
    ) -> Result<Post, ServiceError> {
        self.authorize_owner(id, caller_id).await?;
        validate_post_fields(&title, &content)?;

        // A delete can land between the guard and the write; the store then
        // reports the post gone and the caller sees NotFound.
        self.posts
            .update_content(id, &title, &content, Utc::now())
            .await
            .map_err(ServiceError::Store)?
            .ok_or(ServiceError::PostNotFound)
    }

    pub async fn delete(&self, id: &str, caller_id: &str) -> Result<(), ServiceError> {
        self.authorize_owner(id, caller_id).await?;

        if !self.posts.delete(id).await.map_err(ServiceError::Store)? {
            return Err(ServiceError::PostNotFound);
        }

        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }

    /// Ownership gate: existence is checked before ownership, so a missing
    /// post yields NotFound for owners and strangers alike. Returns the
    /// loaded post so callers do not fetch twice.
    async fn authorize_owner(&self, id: &str, caller_id: &str) -> Result<Post, ServiceError> {
        let post = self
            .posts
            .find_by_id(id)
            .await
            .map_err(ServiceError::Store)?
            .ok_or(ServiceError::PostNotFound)?;

        if post.author_id != caller_id {
            return Err(ServiceError::NotPostOwner);
        }

        Ok(post)
    }
}

fn validate_post_fields(title: &str, content: &str) -> Result<(), ServiceError> {
    if is_blank_markup(title) {
        return Err(ServiceError::Validation(
            "Title must not be empty".to_string(),
        ));
    }
    if is_blank_markup(content) {
        return Err(ServiceError::Validation(
            "Content must not be empty".to_string(),
        ));
    }
    Ok(())
}
