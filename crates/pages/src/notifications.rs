//! Notification pages: the shared feed and the student's inbox

use learnloop_client::ApiError;
use learnloop_common::Route;
use learnloop_session::{GuardOutcome, Role, RoleSet};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};

/// Role feed; admins and teachers can also broadcast
#[derive(Debug)]
pub struct NotificationsPage {
    ctx: PageContext,
    pub role: Option<Role>,
    pub notifications: Vec<Value>,
    pub draft: String,
    pub status: ViewStatus,
}

impl NotificationsPage {
    const ROUTE: Route = Route::Notifications;

    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            role: None,
            notifications: Vec::new(),
            draft: String::new(),
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) -> bool {
        let GuardOutcome::Allow(session) = self.ctx.guard(RoleSet::ANY_ROLE) else {
            return false;
        };
        let role = session.identity.role;
        self.role = Some(role);

        self.status.begin();
        let result = self.ctx.api().role_notifications(role).await;
        self.show(result.map(Some))
    }

    pub fn can_send(&self) -> bool {
        self.role.is_some_and(|role| role.can_notify())
    }

    pub async fn send(&mut self) -> bool {
        let Some(role) = self.role.filter(|role| role.can_notify()) else {
            return false;
        };
        let content = self.draft.trim().to_string();
        if content.is_empty() {
            return false;
        }

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.send_notification(role, &content), || {
                api.role_notifications(role)
            })
            .await;
        let shown = self.show(result);
        if shown {
            self.draft.clear();
        }
        shown
    }

    fn show(&mut self, result: Result<Option<Vec<Value>>, ApiError>) -> bool {
        if !self.ctx.is_on(Self::ROUTE) {
            return false;
        }
        apply(&mut self.notifications, &mut self.status, result)
    }
}

/// A student's own notifications
#[derive(Debug)]
pub struct StudentNotificationsPage {
    ctx: PageContext,
    pub profile: Option<Value>,
    pub notifications: Vec<Value>,
    pub status: ViewStatus,
}

impl StudentNotificationsPage {
    const ROUTE: Route = Route::StudentNotifications;

    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            profile: None,
            notifications: Vec::new(),
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) -> bool {
        if !self.ctx.guard(RoleSet::STUDENT_ONLY).is_allowed() {
            return false;
        }

        self.status.begin();
        let profile = self.ctx.api().profile().await;
        if !self.ctx.is_on(Self::ROUTE) {
            return false;
        }
        match profile {
            Ok(profile) => self.profile = profile,
            Err(e) => {
                self.status.fail(e.to_string());
                return false;
            }
        }

        self.refresh().await
    }

    pub async fn refresh(&mut self) -> bool {
        self.status.begin();
        let result = self.ctx.api().student_notifications().await;
        if !self.ctx.is_on(Self::ROUTE) {
            return false;
        }
        apply(&mut self.notifications, &mut self.status, result.map(Some))
    }

    pub fn back(&self) {
        self.ctx.navigate(Route::StudentDashboard);
    }
}

fn apply(
    list: &mut Vec<Value>,
    status: &mut ViewStatus,
    result: Result<Option<Vec<Value>>, ApiError>,
) -> bool {
    match result {
        Ok(Some(items)) => {
            *list = items;
            status.done();
            true
        }
        Ok(None) => {
            status.done();
            false
        }
        Err(e) => {
            status.fail(e.to_string());
            false
        }
    }
}
