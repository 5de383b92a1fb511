//! Resource collections: users, students, teachers
//!
//! Collection paths keep their trailing slash; without it the backend
//! answers with a redirect that downgrades POST to GET.

use learnloop_common::Pagination;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiClient;
use crate::endpoints::list_from;
use crate::error::ApiError;
use crate::request::RequestOptions;

pub const USERS_PATH: &str = "/api/users/";
pub const STUDENTS_PATH: &str = "/api/students/";
pub const TEACHERS_PATH: &str = "/api/teacher/";

/// Filters and pagination for a list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: Vec<(String, String)>,
    pub page: Pagination,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter; blank values are left out like an unset form field
    pub fn filter(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.filters.push((name.into(), value.to_string()));
        }
        self
    }

    pub fn page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    fn into_options(self) -> RequestOptions {
        let mut options = RequestOptions::get();
        for (name, value) in self.filters {
            options = options.with_query(name, value);
        }
        for (name, value) in self.page.query_pairs() {
            options = options.with_query(name, value);
        }
        options
    }
}

/// Student registration payload
#[derive(Clone, Serialize)]
pub struct NewStudent {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub grade: Option<String>,
    #[serde(rename = "class")]
    pub class_name: String,
}

impl std::fmt::Debug for NewStudent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewStudent")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("grade", &self.grade)
            .field("class_name", &self.class_name)
            .finish()
    }
}

/// Teacher registration payload
#[derive(Clone, Serialize)]
pub struct NewTeacher {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub subject: Option<String>,
    pub department: Option<String>,
    pub employee_code: Option<String>,
    pub phone: Option<String>,
}

impl std::fmt::Debug for NewTeacher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewTeacher")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("subject", &self.subject)
            .field("department", &self.department)
            .field("employee_code", &self.employee_code)
            .field("phone", &self.phone)
            .finish()
    }
}

/// CRUD access to one backend collection.
///
/// Methods take the handle by value so the returned futures only borrow
/// the client.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    client: &'a ApiClient,
    path: &'static str,
}

impl<'a> Collection<'a> {
    pub fn new(client: &'a ApiClient, path: &'static str) -> Self {
        Self { client, path }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}{}", self.path, id)
    }

    pub async fn list(self, query: ListQuery) -> Result<Vec<Value>, ApiError> {
        let value = self.client.request(self.path, query.into_options()).await?;
        Ok(list_from(value, None))
    }

    pub async fn get(self, id: i64) -> Result<Option<Value>, ApiError> {
        self.client
            .request(&self.item_path(id), RequestOptions::get())
            .await
    }

    pub async fn create<T: Serialize + ?Sized>(self, payload: &T) -> Result<Option<Value>, ApiError> {
        let options = RequestOptions::json(Method::POST, payload)?;
        self.client.request(self.path, options).await
    }

    pub async fn update<T: Serialize + ?Sized>(
        self,
        id: i64,
        patch: &T,
    ) -> Result<Option<Value>, ApiError> {
        let options = RequestOptions::json(Method::PATCH, patch)?;
        self.client.request(&self.item_path(id), options).await
    }

    pub async fn delete(self, id: i64) -> Result<Option<Value>, ApiError> {
        self.client
            .request(&self.item_path(id), RequestOptions::delete())
            .await
    }
}

impl ApiClient {
    pub fn users(&self) -> Collection<'_> {
        Collection::new(self, USERS_PATH)
    }

    pub fn students(&self) -> Collection<'_> {
        Collection::new(self, STUDENTS_PATH)
    }

    pub fn teachers(&self) -> Collection<'_> {
        Collection::new(self, TEACHERS_PATH)
    }
}
