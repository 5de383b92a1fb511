//! Teacher dashboard

use learnloop_client::{ApiError, MaterialUpload};
use learnloop_common::{file_url, Route};
use learnloop_session::{GuardOutcome, Role, RoleSet, Session};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};

const ROUTE: Route = Route::TeacherDashboard;

#[derive(Debug)]
pub struct TeacherDashboard {
    ctx: PageContext,
    pub session: Option<Session>,
    pub profile: Option<Value>,
    pub today: Vec<Value>,
    pub materials: Vec<Value>,
    /// Notification being composed
    pub notification_draft: String,
    pub last_reply: Option<String>,
    pub status: ViewStatus,
}

impl TeacherDashboard {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            session: None,
            profile: None,
            today: Vec::new(),
            materials: Vec::new(),
            notification_draft: String::new(),
            last_reply: None,
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) -> bool {
        let GuardOutcome::Allow(session) = self.ctx.guard(RoleSet::TEACHER_ONLY) else {
            return false;
        };
        self.session = Some(session);
        self.status.begin();

        let profile = self.ctx.api().profile().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match profile {
            Ok(profile) => self.profile = profile,
            Err(e) => {
                self.status.fail(e.to_string());
                return false;
            }
        }

        let today = self.ctx.api().teacher_schedule().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match today {
            Ok(today) => self.today = today,
            Err(e) => {
                self.status.fail(e.to_string());
                return false;
            }
        }

        self.refresh_materials().await;
        self.status.done();
        self.ctx.is_on(ROUTE)
    }

    pub async fn refresh_materials(&mut self) {
        let result = self.ctx.api().my_materials().await;
        if !self.ctx.is_on(ROUTE) {
            return;
        }
        match result {
            Ok(materials) => self.materials = materials,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load materials");
                self.materials.clear();
            }
        }
    }

    pub async fn upload(&mut self, upload: MaterialUpload) -> bool {
        if upload.title.trim().is_empty()
            || upload.target_grade.trim().is_empty()
            || upload.file.bytes.is_empty()
        {
            self.status.fail("Please provide Title, Grade, and a File.");
            return false;
        }

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.upload_material(upload), || api.my_materials())
            .await;
        self.show_materials(result, "Material uploaded!")
    }

    pub async fn delete_material(&mut self, id: i64) -> bool {
        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.delete_material(id), || api.my_materials())
            .await;
        self.show_materials(result, "Material deleted.")
    }

    pub async fn send_notification(&mut self) -> bool {
        let content = self.notification_draft.trim().to_string();
        if content.is_empty() {
            return false;
        }

        self.status.begin();
        let result = self
            .ctx
            .api()
            .send_notification(Role::Teacher, &content)
            .await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(_) => {
                self.notification_draft.clear();
                self.status.succeed("Notification sent!");
                true
            }
            Err(e) => {
                self.status
                    .fail(format!("Failed to send notification: {}", e));
                false
            }
        }
    }

    pub async fn ask(&mut self, message: &str) -> bool {
        if message.trim().is_empty() {
            return false;
        }
        let result = self.ctx.api().ask(Role::Teacher, message.trim()).await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(reply) => {
                self.last_reply = reply.map(|r| r.reply);
                self.last_reply.is_some()
            }
            Err(e) => {
                self.status.fail(e.to_string());
                false
            }
        }
    }

    /// Link for a material's stored file
    pub fn material_link(&self, material: &Value) -> String {
        file_url(
            &self.ctx.api().config().api_base,
            material.get("file_path").and_then(Value::as_str),
        )
    }

    pub fn open(&self, route: Route) {
        self.ctx.navigate(route);
    }

    pub fn logout(&mut self) {
        self.ctx.logout();
    }

    fn show_materials(
        &mut self,
        result: Result<Option<Vec<Value>>, ApiError>,
        notice: &str,
    ) -> bool {
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(Some(materials)) => {
                self.materials = materials;
                self.status.succeed(notice);
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
