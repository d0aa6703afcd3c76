//! Record store adapter for the `users` collection.
//!
//! Handlers receive the store as `web::Data<dyn UserStore>`, so the MongoDB
//! implementation can be swapped for the in-memory one in tests.

#[cfg(test)]
pub mod memory;
pub mod mongo;
pub mod unavailable;

#[cfg(test)]
pub use memory::InMemoryUserStore;
pub use mongo::MongoUserStore;
pub use unavailable::UnavailableUserStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::models::{DeleteOutcome, UpdateOutcome, User, UserFields};
use crate::utils::AppError;

pub const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user and returns it with the assigned id.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Users whose `field` equals `value`.
    async fn find_where(&self, field: &str, value: Value) -> Result<Vec<User>, AppError>;

    /// `$set`-merges `fields` into the user with `id`. An unknown id yields a
    /// zero-count outcome, not an error.
    async fn update_by_id(&self, id: &str, fields: UserFields) -> Result<UpdateOutcome, AppError>;

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}
