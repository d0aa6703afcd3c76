use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{parse_id, UserStore};
use crate::models::{cast_user_fields, DeleteOutcome, UpdateOutcome, User, UserFields};
use crate::utils::AppError;

/// In-memory stand-in for the `users` collection, in insertion order.
/// Documents are kept as open JSON maps so `$set` can write any field.
#[derive(Default)]
pub struct InMemoryUserStore {
    documents: RwLock<Vec<(ObjectId, Map<String, Value>)>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn decode(id: ObjectId, document: &Map<String, Value>) -> Option<User> {
        match serde_json::from_value::<User>(Value::Object(document.clone())) {
            Ok(mut user) => {
                user.id = Some(id);
                Some(user)
            }
            Err(e) => {
                log::warn!("⚠️  Skipping undecodable user document {}: {}", id, e);
                None
            }
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let id = ObjectId::new();
        user.id = None;

        let document = match serde_json::to_value(&user) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        };

        self.documents.write().await.push((id, document));

        user.id = Some(id);
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter_map(|(id, doc)| Self::decode(*id, doc))
            .collect())
    }

    async fn find_where(&self, field: &str, value: Value) -> Result<Vec<User>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|(_, doc)| doc.get(field) == Some(&value))
            .filter_map(|(id, doc)| Self::decode(*id, doc))
            .collect())
    }

    async fn update_by_id(&self, id: &str, fields: UserFields) -> Result<UpdateOutcome, AppError> {
        let object_id = parse_id(id)?;
        let fields = cast_user_fields(fields)?;

        if fields.contains_key("_id") {
            return Err(AppError::DatabaseError(
                "Performing an update on the path '_id' would modify the immutable field '_id'"
                    .to_string(),
            ));
        }

        let mut documents = self.documents.write().await;
        let Some((_, document)) = documents.iter_mut().find(|(doc_id, _)| *doc_id == object_id)
        else {
            return Ok(UpdateOutcome::new(0, 0));
        };

        let mut modified = false;
        for (key, value) in fields {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome::new(1, u64::from(modified)))
    }

    async fn delete_by_id(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        let object_id = parse_id(id)?;

        let mut documents = self.documents.write().await;
        let before = documents.len();
        if let Some(pos) = documents.iter().position(|(doc_id, _)| *doc_id == object_id) {
            documents.remove(pos);
        }

        Ok(DeleteOutcome::new((before - documents.len()) as u64))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> UserFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = InMemoryUserStore::new();

        let a = store.insert(User::default()).await.unwrap();
        let b = store.insert(User::default()).await.unwrap();

        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_and_reports_modification() {
        let store = InMemoryUserStore::new();
        let user = store
            .insert(User {
                name: Some("Ann".to_string()),
                age: Some(30.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = user.id.unwrap().to_hex();

        let outcome = store.update_by_id(&id, fields(json!({ "age": 31 }))).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::new(1, 1));

        let stored = &store.find_all().await.unwrap()[0];
        assert_eq!(stored.name.as_deref(), Some("Ann"));
        assert_eq!(stored.age, Some(31.into()));

        // Same value again: matched but not modified
        let outcome = store.update_by_id(&id, fields(json!({ "age": 31 }))).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::new(1, 0));
    }

    #[tokio::test]
    async fn test_update_rejects_id_change() {
        let store = InMemoryUserStore::new();
        let user = store.insert(User::default()).await.unwrap();
        let id = user.id.unwrap().to_hex();

        let result = store
            .update_by_id(&id, fields(json!({ "_id": ObjectId::new().to_hex() })))
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_find_where_matches_exact_value_only() {
        let store = InMemoryUserStore::new();
        for is_active in [Some(true), Some(false), None] {
            store
                .insert(User {
                    is_active,
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let active = store.find_where("isActive", json!(true)).await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].is_active, Some(true));
    }

    #[tokio::test]
    async fn test_loosely_typed_update_is_cast_and_stays_listed() {
        let store = InMemoryUserStore::new();
        let user = store
            .insert(User {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = user.id.unwrap().to_hex();

        let outcome = store
            .update_by_id(&id, fields(json!({ "age": "31", "name": 5 })))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::new(1, 1));

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].age, Some(31.into()));
        assert_eq!(all[0].name.as_deref(), Some("5"));
        assert_eq!(store.find_where("isActive", json!(true)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_uncastable_update_fails_and_leaves_record_intact() {
        let store = InMemoryUserStore::new();
        let user = store
            .insert(User {
                age: Some(30.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = user.id.unwrap().to_hex();

        let result = store
            .update_by_id(&id, fields(json!({ "age": "thirty" })))
            .await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].age, Some(30.into()));
    }
}
