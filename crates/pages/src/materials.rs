//! Materials page shared by every role

use learnloop_client::{ApiError, FilePart, ModerationAction};
use learnloop_common::{file_url, Route};
use learnloop_session::{GuardOutcome, Role, RoleSet};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};

const ROUTE: Route = Route::Materials;

#[derive(Debug)]
pub struct MaterialsPage {
    ctx: PageContext,
    pub role: Option<Role>,
    pub materials: Vec<Value>,
    pub status: ViewStatus,
}

impl MaterialsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            role: None,
            materials: Vec::new(),
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
        let result = self.ctx.api().role_materials(role).await;
        self.show(result.map(Some), None)
    }

    /// Teachers only; other roles are ignored
    pub async fn upload(&mut self, file: FilePart) -> bool {
        let Some(role @ Role::Teacher) = self.role else {
            return false;
        };
        if file.file_name.trim().is_empty() {
            self.status.fail("No filename");
            return false;
        }

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.upload_role_file(role, file), || api.role_materials(role))
            .await;
        self.show(result, Some("Uploaded!"))
    }

    /// Admins only; other roles are ignored
    pub async fn moderate(&mut self, id: i64, action: ModerationAction) -> bool {
        let Some(role @ Role::Admin) = self.role else {
            return false;
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.moderate_material(id, action), || api.role_materials(role))
            .await;
        self.show(result, None)
    }

    /// Admins only; removes the material outright
    pub async fn delete(&mut self, id: i64) -> bool {
        let Some(role @ Role::Admin) = self.role else {
            return false;
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.delete_material(id), || api.role_materials(role))
            .await;
        self.show(result, Some("Material deleted."))
    }

    pub fn material_link(&self, material: &Value) -> String {
        file_url(
            &self.ctx.api().config().api_base,
            material.get("file_path").and_then(Value::as_str),
        )
    }

    fn show(&mut self, result: Result<Option<Vec<Value>>, ApiError>, notice: Option<&str>) -> bool {
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(Some(materials)) => {
                self.materials = materials;
                match notice {
                    Some(notice) => self.status.succeed(notice),
                    None => self.status.done(),
                }
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
