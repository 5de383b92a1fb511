//! Typed wrappers for the backend endpoints the client uses
//!
//! Backend records are passed through as opaque JSON. Only payloads the
//! client builds itself are typed.

pub mod auth;
pub mod chat;
pub mod collections;
pub mod materials;
pub mod messages;
pub mod notifications;
pub mod timetable;

pub use auth::LoginRequest;
pub use chat::ChatReply;
pub use collections::{Collection, ListQuery, NewStudent, NewTeacher};
pub use materials::{MaterialUpload, ModerationAction};
pub use timetable::{TimetableDay, TimetableSlot};

use serde_json::Value;

/// Pull a list out of a response.
///
/// Endpoints answer either with a bare array or with an object wrapping
/// the array under `key` (`{"schedule": [...]}`). Anything else, including
/// an empty result, is an empty list.
pub fn list_from(value: Option<Value>, key: Option<&str>) -> Vec<Value> {
    match (value, key) {
        (Some(Value::Array(items)), _) => items,
        (Some(Value::Object(mut map)), Some(key)) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
