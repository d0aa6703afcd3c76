//! Casting of incoming values to the `User` field types.
//!
//! Known fields are coerced to their schema type before they reach the store
//! (`"31"` becomes `31`, `"true"` becomes `true`); a value that cannot be
//! coerced fails the whole write. Unknown fields pass through untouched.

use serde_json::{Number, Value};

use super::UserFields;
use crate::utils::AppError;

/// Casts the known user fields in `fields`, in place.
pub fn cast_user_fields(mut fields: UserFields) -> Result<UserFields, AppError> {
    for (path, value) in fields.iter_mut() {
        let cast = match path.as_str() {
            "name" | "email" => cast_string(value),
            "age" => cast_number(value),
            "isActive" => cast_bool(value),
            _ => continue,
        };

        match cast {
            Some(cast) => *value = cast,
            None => return Err(cast_error(path, value)),
        }
    }

    Ok(fields)
}

fn cast_error(path: &str, value: &Value) -> AppError {
    let kind = match path {
        "age" => "Number",
        "isActive" => "Boolean",
        _ => "String",
    };
    AppError::DatabaseError(format!(
        "Cast to {} failed for value {} at path \"{}\"",
        kind, value, path
    ))
}

fn cast_string(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::String(_) => Some(value.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn cast_number(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::Number(_) => Some(value.clone()),
        Value::Bool(b) => Some(Value::from(u8::from(*b))),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(Value::Null);
            }
            if let Ok(i) = s.parse::<i64>() {
                return Some(Value::from(i));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn cast_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::Bool(_) => Some(value.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(Value::Bool(true)),
            Some(v) if v == 0.0 => Some(Value::Bool(false)),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" | "yes" => Some(Value::Bool(true)),
            "false" | "0" | "no" => Some(Value::Bool(false)),
            _ => None,
        },
        Value::Array(_) | Value::Object(_) => None,
    }
}
