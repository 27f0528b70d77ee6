//! MongoDB implementation of UserStorage

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc},
};
use std::time::Duration;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::mapping;
use crate::models::{User, UserPatch};
use crate::storage::UserStorage;

/// MongoDB implementation of the UserStorage
#[derive(Clone)]
pub struct MongoUserStorage {
    collection: Collection<Document>,
    operation_timeout: Option<Duration>,
}

impl MongoUserStorage {
    /// Create a storage over `collection_name` in `db`
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let storage = MongoUserStorage::new(&client.database("mydb"), "users");
    /// ```
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Document>(collection_name),
            operation_timeout: None,
        }
    }

    /// Bound every driver call; expiry fails with `Persistence`
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    async fn run<F, T>(&self, operation: F) -> UserResult<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        let operation = operation.into_future();
        match self.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .map_err(|_| {
                    UserError::Persistence(format!("operation exceeded {:?}", limit))
                })?
                .map_err(UserError::from),
            None => operation.await.map_err(UserError::from),
        }
    }

    /// Hex id for an ObjectId `_id`; any other id type is removed again and
    /// reported as `Encoding`. The mapping never writes `_id`, so this only
    /// trips if the driver or the mapping starts assigning other id types.
    async fn resolve_inserted_id(&self, inserted: Bson) -> UserResult<String> {
        match inserted {
            Bson::ObjectId(id) => Ok(id.to_hex()),
            other => {
                let removed = self.remove_orphan(&other).await;
                Err(UserError::Encoding {
                    orphan_id: other.to_string(),
                    removed,
                })
            }
        }
    }

    async fn find_documents(&self) -> mongodb::error::Result<Vec<Document>> {
        let cursor = self.collection.find(doc! {}).await?;
        cursor.try_collect().await
    }

    /// Best-effort removal of a document whose id could not be encoded
    async fn remove_orphan(&self, id: &Bson) -> bool {
        let mut filter = Document::new();
        filter.insert(mapping::ID, id.clone());

        matches!(
            self.run(self.collection.delete_one(filter)).await,
            Ok(result) if result.deleted_count > 0
        )
    }
}

#[async_trait]
impl UserStorage for MongoUserStorage {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &User) -> UserResult<String> {
        let document = mapping::to_document(user);
        let result = self.run(self.collection.insert_one(document)).await?;

        self.resolve_inserted_id(result.inserted_id).await
    }

    #[instrument(skip(self))]
    async fn find_one(&self, id: &str) -> UserResult<User> {
        let oid = mapping::parse_object_id(id)?;

        let document = self
            .run(self.collection.find_one(mapping::id_filter(oid)))
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        mapping::from_document(&document)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<User>> {
        // One deadline covers the query and draining the cursor
        let documents = self.run(self.find_documents()).await?;

        documents.iter().map(mapping::from_document).collect()
    }

    #[instrument(skip(self, user), fields(user_id = ?user.id))]
    async fn update(&self, user: &User) -> UserResult<()> {
        let id = user.id.as_deref().unwrap_or_default();
        let oid = mapping::parse_object_id(id)?;

        let update = doc! { "$set": mapping::to_document(user) };
        let result = self
            .run(self.collection.update_one(mapping::id_filter(oid), update))
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn patch(&self, id: &str, patch: &UserPatch) -> UserResult<()> {
        let oid = mapping::parse_object_id(id)?;
        if patch.is_empty() {
            return Err(UserError::Validation(
                "at least one field must be provided".to_string(),
            ));
        }

        let update = doc! { "$set": mapping::to_set_document(patch) };
        let result = self
            .run(self.collection.update_one(mapping::id_filter(oid), update))
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<()> {
        let oid = mapping::parse_object_id(id)?;

        let result = self
            .run(self.collection.delete_one(mapping::id_filter(oid)))
            .await?;

        if result.deleted_count == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
