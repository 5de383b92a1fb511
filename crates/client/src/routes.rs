//! Role-specific backend routes
//!
//! Several features live under a different backend path depending on who
//! is asking (`/teacher/notifications` vs `/admin/notifications`, and the
//! admin alert endpoint has no teacher counterpart at the same path). The
//! mapping is backend-defined, so it is plain configuration here rather
//! than something derived from the role name.

use learnloop_session::Role;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One backend path per role; `None` means the role has no such endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerRole {
    pub admin: Option<String>,
    pub teacher: Option<String>,
    pub student: Option<String>,
}

impl PerRole {
    /// `/{role}{suffix}` for every role
    pub fn prefixed(suffix: &str) -> Self {
        Self {
            admin: Some(format!("/admin{}", suffix)),
            teacher: Some(format!("/teacher{}", suffix)),
            student: Some(format!("/student{}", suffix)),
        }
    }

    pub fn for_role(&self, role: Role) -> Option<&str> {
        match role {
            Role::Admin => self.admin.as_deref(),
            Role::Teacher => self.teacher.as_deref(),
            Role::Student => self.student.as_deref(),
        }
    }

    /// Path for `role`, or the error naming the missing `endpoint`
    pub fn require(&self, role: Role, endpoint: &'static str) -> Result<&str, ApiError> {
        self.for_role(role).ok_or_else(|| ApiError::MissingRoute {
            endpoint,
            role: role.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRoutes {
    pub materials: PerRole,
    pub material_upload: PerRole,
    pub messages: PerRole,
    pub message_send: PerRole,
    pub notifications: PerRole,
    pub notification_send: PerRole,
    pub chat: PerRole,
    /// Admin moderation prefix for materials: `{prefix}/{id}/{action}`
    pub material_moderation: String,
    /// Admin moderation prefix for messages: `{prefix}/{id}/{action}`
    pub message_moderation: String,
}

impl Default for RoleRoutes {
    fn default() -> Self {
        Self {
            materials: PerRole::prefixed("/materials"),
            material_upload: PerRole {
                teacher: Some("/teacher/materials/upload".to_string()),
                ..PerRole::default()
            },
            messages: PerRole::prefixed("/messages"),
            message_send: PerRole::prefixed("/messages/send"),
            notifications: PerRole::prefixed("/notifications"),
            notification_send: PerRole {
                admin: Some("/admin/send-alert".to_string()),
                teacher: Some("/teacher/notifications/send".to_string()),
                student: None,
            },
            chat: PerRole {
                admin: Some("/api/chat/teacher".to_string()),
                teacher: Some("/api/chat/teacher".to_string()),
                student: Some("/api/chat/student".to_string()),
            },
            material_moderation: "/admin/materials".to_string(),
            message_moderation: "/admin/messages".to_string(),
        }
    }
}
