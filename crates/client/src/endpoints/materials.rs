//! Learning materials: upload, listing, moderation

use learnloop_session::Role;
use reqwest::Method;
use serde_json::Value;

use crate::api::ApiClient;
use crate::endpoints::list_from;
use crate::error::ApiError;
use crate::request::{FilePart, MultipartForm, RequestOptions};

pub const MATERIALS_PATH: &str = "/api/materials/";
pub const MY_MATERIALS_PATH: &str = "/api/materials/mine";
pub const MATERIALS_FOR_ME_PATH: &str = "/api/materials/for-me";

/// Upload form; turned into a multipart body
#[derive(Debug, Clone)]
pub struct MaterialUpload {
    pub title: String,
    pub target_grade: String,
    pub target_section: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub file: FilePart,
}

impl MaterialUpload {
    pub fn new(title: impl Into<String>, target_grade: impl Into<String>, file: FilePart) -> Self {
        Self {
            title: title.into(),
            target_grade: target_grade.into(),
            target_section: None,
            description: None,
            subject: None,
            file,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.target_section = Some(section.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Multipart body; blank optional fields are not sent
    pub fn into_form(self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", self.title.trim())
            .text("target_grade", self.target_grade.trim());

        let optional = [
            ("target_section", self.target_section),
            ("description", self.description),
            ("subject", self.subject),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                form = form.text(name, value);
            }
        }

        form.file("file", self.file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    Flag,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::Flag => "flag",
        }
    }
}

impl ApiClient {
    pub async fn upload_material(&self, upload: MaterialUpload) -> Result<Option<Value>, ApiError> {
        tracing::info!(title = %upload.title, "Uploading material");
        let options = RequestOptions::multipart(Method::POST, upload.into_form());
        self.request(MATERIALS_PATH, options).await
    }

    /// Materials uploaded by the signed-in teacher
    pub async fn my_materials(&self) -> Result<Vec<Value>, ApiError> {
        let value = self.request(MY_MATERIALS_PATH, RequestOptions::get()).await?;
        Ok(list_from(value, None))
    }

    /// Materials targeted at the signed-in student's class
    pub async fn materials_for_me(&self) -> Result<Vec<Value>, ApiError> {
        let value = self
            .request(MATERIALS_FOR_ME_PATH, RequestOptions::get())
            .await?;
        Ok(list_from(value, None))
    }

    pub async fn delete_material(&self, id: i64) -> Result<Option<Value>, ApiError> {
        self.request(&format!("{}{}", MATERIALS_PATH, id), RequestOptions::delete())
            .await
    }

    /// Materials visible to `role`, from the role-specific route
    pub async fn role_materials(&self, role: Role) -> Result<Vec<Value>, ApiError> {
        let path = self.routes().materials.require(role, "materials")?.to_string();
        let value = self.request(&path, RequestOptions::get()).await?;
        Ok(list_from(value, Some("materials")))
    }

    /// Store a bare file in the role's upload area
    pub async fn upload_role_file(&self, role: Role, file: FilePart) -> Result<Option<Value>, ApiError> {
        let path = self
            .routes()
            .material_upload
            .require(role, "material upload")?
            .to_string();
        let form = MultipartForm::new().file("file", file);
        self.request(&path, RequestOptions::multipart(Method::POST, form))
            .await
    }

    pub async fn moderate_material(
        &self,
        id: i64,
        action: ModerationAction,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!(
            "{}/{}/{}",
            self.routes().material_moderation,
            id,
            action.as_str()
        );
        self.request(&path, RequestOptions::with_method(Method::POST))
            .await
    }
}
