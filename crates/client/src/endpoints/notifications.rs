//! Notifications: role feeds, sending, student unread tracking

use learnloop_session::Role;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiClient;
use crate::endpoints::list_from;
use crate::error::ApiError;
use crate::request::RequestOptions;

pub const STUDENT_UNREAD_PATH: &str = "/api/students/notifications/unread";
pub const STUDENT_MARK_READ_PATH: &str = "/api/students/notifications/mark-read-not";
pub const STUDENT_NOTIFICATIONS_PATH: &str = "/api/student/notifications";

#[derive(Debug, Clone, Serialize)]
struct Content<'a> {
    content: &'a str,
}

impl ApiClient {
    pub async fn role_notifications(&self, role: Role) -> Result<Vec<Value>, ApiError> {
        let path = self
            .routes()
            .notifications
            .require(role, "notifications")?
            .to_string();
        let value = self.request(&path, RequestOptions::get()).await?;
        Ok(list_from(value, Some("notifications")))
    }

    /// Send a notification as `role`; students have no send route by default
    pub async fn send_notification(
        &self,
        role: Role,
        content: &str,
    ) -> Result<Option<Value>, ApiError> {
        let path = self
            .routes()
            .notification_send
            .require(role, "notification send")?
            .to_string();
        let options = RequestOptions::json(Method::POST, &Content { content })?;
        self.request(&path, options).await
    }

    /// Number of unread notifications for the signed-in student.
    ///
    /// The backend reports `{"unread": n}`; a list under the same key is
    /// counted, anything else counts as zero.
    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        let value = self
            .request(STUDENT_UNREAD_PATH, RequestOptions::get())
            .await?;
        let count = match value.as_ref().and_then(|v| v.get("unread")) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::Array(items)) => items.len() as u64,
            _ => 0,
        };
        Ok(count)
    }

    pub async fn mark_notifications_read(&self) -> Result<Option<Value>, ApiError> {
        self.request(
            STUDENT_MARK_READ_PATH,
            RequestOptions::with_method(Method::POST),
        )
        .await
    }

    pub async fn student_notifications(&self) -> Result<Vec<Value>, ApiError> {
        let value = self
            .request(STUDENT_NOTIFICATIONS_PATH, RequestOptions::get())
            .await?;
        Ok(list_from(value, Some("notifications")))
    }
}
