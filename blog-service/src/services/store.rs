use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use service_core::error::AppError;

use crate::models::{Post, User};

/// User records, keyed by id with a unique email constraint.
///
/// `insert` fails with `AppError::Conflict` when the email is already taken;
/// backends enforce this so concurrent registrations cannot both win.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Post records. Single-document atomicity only; concurrent updates to the
/// same post are last-writer-wins.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: &Post) -> Result<(), AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError>;
    /// All posts, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, AppError>;
    /// Set title, content and `updated_at`; returns the updated post, or
    /// `None` when no post has that id.
    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, AppError>;
    /// Returns false when no post had that id.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// Liveness probe for the /health endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}

/// In-memory backend for integration tests and local development. Not
/// durable; rejected by config validation in production.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    posts: DashMap<String, Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), AppError> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "email already registered"
            )));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, post: &Post) -> Result<(), AppError> {
        self.posts.insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.posts.get(id).map(|p| p.value().clone()))
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.value().clone()).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, AppError> {
        match self.posts.get_mut(id) {
            Some(mut post) => {
                post.title = title.to_string();
                post.content = content.to_string();
                post.updated_at = updated_at;
                Ok(Some(post.value().clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.posts.remove(id).is_some())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
