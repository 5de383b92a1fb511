//! Student dashboard

use learnloop_common::{file_url, Route};
use learnloop_session::{GuardOutcome, Role, RoleSet, Session};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};

const ROUTE: Route = Route::StudentDashboard;

#[derive(Debug)]
pub struct StudentDashboard {
    ctx: PageContext,
    pub session: Option<Session>,
    pub profile: Option<Value>,
    pub week: Vec<Value>,
    pub unread: u64,
    pub materials: Vec<Value>,
    pub last_reply: Option<String>,
    pub status: ViewStatus,
}

impl StudentDashboard {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            session: None,
            profile: None,
            week: Vec::new(),
            unread: 0,
            materials: Vec::new(),
            last_reply: None,
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) -> bool {
        let GuardOutcome::Allow(session) = self.ctx.guard(RoleSet::STUDENT_ONLY) else {
            return false;
        };
        let session_id = session.identity.id;
        self.session = Some(session);
        self.status.begin();

        let profile = self.ctx.api().profile().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        let profile = match profile {
            Ok(profile) => profile,
            Err(e) => return self.fail(e.to_string()),
        };
        let student_id = profile
            .as_ref()
            .and_then(|p| p.get("id"))
            .and_then(Value::as_i64)
            .unwrap_or(session_id);
        self.profile = profile;

        let week = self.ctx.api().student_week(student_id).await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match week {
            Ok(week) => self.week = week,
            Err(e) => return self.fail(e.to_string()),
        }

        let unread = self.ctx.api().unread_count().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match unread {
            Ok(unread) => self.unread = unread,
            Err(e) => return self.fail(e.to_string()),
        }

        let materials = self.ctx.api().materials_for_me().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match materials {
            Ok(materials) => self.materials = materials,
            Err(e) => tracing::warn!(error = %e, "Failed to load materials"),
        }

        self.status.done();
        true
    }

    /// First period of the first day that has any
    pub fn next_class(&self) -> Option<&Value> {
        self.week
            .iter()
            .filter_map(|day| day.get("items").and_then(Value::as_array))
            .find(|items| !items.is_empty())
            .and_then(|items| items.first())
    }

    pub async fn mark_all_read(&mut self) -> bool {
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.mark_notifications_read(), || api.unread_count())
            .await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(Some(unread)) => {
                self.unread = unread;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to mark notifications as read");
                false
            }
        }
    }

    /// Mark everything read, then open the notification list
    pub async fn open_notifications(&mut self) {
        self.mark_all_read().await;
        if self.ctx.is_on(ROUTE) {
            self.ctx.navigate(Route::StudentNotifications);
        }
    }

    pub async fn ask(&mut self, message: &str) -> bool {
        if message.trim().is_empty() {
            return false;
        }
        let result = self.ctx.api().ask(Role::Student, message.trim()).await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(reply) => {
                self.last_reply = reply.map(|r| r.reply);
                self.last_reply.is_some()
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    pub fn material_link(&self, material: &Value) -> String {
        file_url(
            &self.ctx.api().config().api_base,
            material.get("file_path").and_then(Value::as_str),
        )
    }

    pub fn logout(&mut self) {
        self.ctx.logout();
    }

    fn fail(&mut self, message: String) -> bool {
        if self.ctx.is_on(ROUTE) {
            self.status.fail(message);
        }
        false
    }
}
