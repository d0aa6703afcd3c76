use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::cast_user_fields;
use crate::utils::AppError;

/// Usuário armazenado na coleção `users`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Inteiro ou decimal, preservado como enviado
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,

    /// Ausente = não definido (sem default)
    #[serde(rename = "isActive", default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Request para criar usuário (todos os campos opcionais)
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub age: Option<Number>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl CreateUserRequest {
    /// Casts a raw body with the same rules as an update, keeping only the
    /// schema fields.
    pub fn from_fields(fields: UserFields) -> Result<Self, AppError> {
        let fields = cast_user_fields(fields)?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            id: None,
            name: req.name,
            email: req.email,
            age: req.age,
            is_active: req.is_active,
        }
    }
}

/// Campos arbitrários aplicados via `$set` (sem schema)
pub type UserFields = serde_json::Map<String, serde_json::Value>;

/// Response de usuário, com `_id` como string hex
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub age: Option<Number>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            age: user.age,
            is_active: user.is_active,
        }
    }
}
