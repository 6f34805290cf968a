use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    Client as MongoClient, Collection, Database, IndexModel,
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use service_core::error::AppError;

use crate::models::{Post, User};
use crate::services::store::{PostStore, StoreHealth, UserStore};
use futures::stream::TryStreamExt;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        // Unique email index backs registration; the pre-insert lookup only
        // provides the friendly error, this closes the race.
        let email_unique = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();
        self.users().create_index(email_unique, None).await?;
        tracing::info!("Created unique index on users.email");

        let author_index = IndexModel::builder()
            .keys(doc! { "author_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("author_lookup".to_string())
                    .build(),
            )
            .build();
        self.posts().create_index(author_index, None).await?;

        let created_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();
        self.posts().create_index(created_index, None).await?;
        tracing::info!("Created indexes on posts.author_id and posts.created_at");

        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn posts(&self) -> Collection<Post> {
        self.db.collection("posts")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

#[async_trait]
impl UserStore for MongoDb {
    async fn insert(&self, user: &User) -> Result<(), AppError> {
        self.users().insert_one(user, None).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::Conflict(anyhow::anyhow!("email already registered"))
            } else {
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "email": email }, None).await?)
    }
}

#[async_trait]
impl PostStore for MongoDb {
    async fn insert(&self, post: &Post) -> Result<(), AppError> {
        self.posts().insert_one(post, None).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.posts().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_newest_first(&self) -> Result<Vec<Post>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let mut cursor = self.posts().find(None, options).await?;
        let mut posts = Vec::new();
        while let Some(post) = cursor.try_next().await? {
            posts.push(post);
        }
        Ok(posts)
    }

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .posts()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": {
                    "title": title,
                    "content": content,
                    "updated_at": mongodb::bson::DateTime::from_chrono(updated_at),
                }},
                options,
            )
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self.posts().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl StoreHealth for MongoDb {
    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
