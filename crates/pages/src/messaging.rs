//! Messaging page

use learnloop_client::{ApiError, ModerationAction};
use learnloop_common::Route;
use learnloop_session::{GuardOutcome, Role, RoleSet};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};

const ROUTE: Route = Route::Messaging;

#[derive(Debug)]
pub struct MessagingPage {
    ctx: PageContext,
    pub role: Option<Role>,
    pub messages: Vec<Value>,
    pub draft: String,
    pub status: ViewStatus,
}

impl MessagingPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            role: None,
            messages: Vec::new(),
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
        let result = self.ctx.api().role_messages(role).await;
        self.show(result.map(Some))
    }

    pub async fn send(&mut self) -> bool {
        let Some(role) = self.role else {
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
            .mutate_then_refresh(api.send_message(role, &content), || api.role_messages(role))
            .await;
        let shown = self.show(result);
        if shown {
            self.draft.clear();
        }
        shown
    }

    /// Admins only
    pub async fn moderate(&mut self, id: i64, action: ModerationAction) -> bool {
        let Some(role @ Role::Admin) = self.role else {
            return false;
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.moderate_message(id, action), || api.role_messages(role))
            .await;
        self.show(result)
    }

    /// Admins only
    pub async fn delete(&mut self, id: i64) -> bool {
        let Some(role @ Role::Admin) = self.role else {
            return false;
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.delete_message(id), || api.role_messages(role))
            .await;
        self.show(result)
    }

    fn show(&mut self, result: Result<Option<Vec<Value>>, ApiError>) -> bool {
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(Some(messages)) => {
                self.messages = messages;
                self.status.done();
                true
            }
            Ok(None) => {
                self.status.done();
                false
            }
            Err(e) => {
                self.status.fail(e.to_string());
                false
            }
        }
    }
}
