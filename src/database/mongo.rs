use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use super::{parse_id, UserStore, USERS_COLLECTION};
use crate::models::{cast_user_fields, DeleteOutcome, UpdateOutcome, User, UserFields};
use crate::utils::AppError;

const DEFAULT_DATABASE: &str = "test";

/// MongoDB-backed user store. Clones share the driver's connection pool.
#[derive(Clone)]
pub struct MongoUserStore {
    db: Database,
}

impl MongoUserStore {
    /// Builds the client without contacting the server; connectivity is
    /// checked separately via [`UserStore::ping`].
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri).await?;

        // Database name comes from the URI path, if any
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        log::info!("📊 Using database '{}'", db.name());

        Ok(Self { db })
    }

    fn users(&self) -> Collection<Document> {
        self.db.collection(USERS_COLLECTION)
    }

    async fn find_by(&self, filter: Document) -> Result<Vec<User>, AppError> {
        let mut cursor = self.users().find(filter).await?;
        let mut users = Vec::new();

        while let Some(result) = cursor.next().await {
            let document = result?;
            match bson::from_document::<User>(document) {
                Ok(user) => users.push(user),
                Err(e) => log::warn!("⚠️  Skipping undecodable user document: {}", e),
            }
        }

        Ok(users)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let document = bson::to_document(&user)?;
        let result = self.users().insert_one(document).await?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.find_by(doc! {}).await
    }

    async fn find_where(&self, field: &str, value: Value) -> Result<Vec<User>, AppError> {
        let mut filter = Document::new();
        filter.insert(field, bson::to_bson(&value)?);
        self.find_by(filter).await
    }

    async fn update_by_id(&self, id: &str, fields: UserFields) -> Result<UpdateOutcome, AppError> {
        let object_id = parse_id(id)?;
        let update = bson::to_document(&cast_user_fields(fields)?)?;

        let result = self
            .users()
            .update_one(doc! { "_id": object_id }, doc! { "$set": update })
            .await?;

        let mut outcome = UpdateOutcome::new(result.matched_count, result.modified_count);
        if let Some(upserted) = result.upserted_id {
            outcome.upserted_id = upserted.as_object_id().map(|oid| oid.to_hex());
            outcome.upserted_count = 1;
        }
        Ok(outcome)
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        let object_id = parse_id(id)?;

        let result = self.users().delete_one(doc! { "_id": object_id }).await?;

        Ok(DeleteOutcome::new(result.deleted_count))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
