use async_trait::async_trait;
use serde_json::Value;

use super::UserStore;
use crate::models::{DeleteOutcome, UpdateOutcome, User, UserFields};
use crate::utils::AppError;

/// Stands in when the MongoDB client could not be built at startup
/// (unparseable URI, failed SRV lookup). Every operation fails with the
/// original construction error so the server keeps answering.
pub struct UnavailableUserStore {
    reason: String,
}

impl UnavailableUserStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        Err(AppError::DatabaseError(format!(
            "store unavailable: {}",
            self.reason
        )))
    }
}

#[async_trait]
impl UserStore for UnavailableUserStore {
    async fn insert(&self, _user: User) -> Result<User, AppError> {
        self.fail()
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.fail()
    }

    async fn find_where(&self, _field: &str, _value: Value) -> Result<Vec<User>, AppError> {
        self.fail()
    }

    async fn update_by_id(&self, _id: &str, _fields: UserFields) -> Result<UpdateOutcome, AppError> {
        self.fail()
    }

    async fn delete_by_id(&self, _id: &str) -> Result<DeleteOutcome, AppError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.fail()
    }
}
