//! Admin dashboard: user directory and registration

use learnloop_client::{ApiError, ListQuery};
use learnloop_common::{Pagination, Route};
use learnloop_session::{GuardOutcome, RoleSet, Session};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};
use crate::forms::{StudentForm, TeacherForm};

const ROUTE: Route = Route::AdminDashboard;

/// The directory is small; fetch it in one page
const DIRECTORY_PAGE: Pagination = Pagination {
    skip: Some(0),
    limit: Some(200),
};

/// Users per role, shown as dashboard tiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub admins: usize,
    pub teachers: usize,
    pub students: usize,
}

impl RoleCounts {
    pub fn from_users(users: &[Value]) -> Self {
        users.iter().fold(Self::default(), |mut counts, user| {
            match user.get("role").and_then(Value::as_str) {
                Some("admin") => counts.admins += 1,
                Some("teacher") => counts.teachers += 1,
                Some("student") => counts.students += 1,
                _ => {}
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.admins + self.teachers + self.students
    }
}

#[derive(Debug)]
pub struct AdminDashboard {
    ctx: PageContext,
    pub session: Option<Session>,
    pub users: Vec<Value>,
    pub counts: RoleCounts,
    pub status: ViewStatus,
}

impl AdminDashboard {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            session: None,
            users: Vec::new(),
            counts: RoleCounts::default(),
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) -> bool {
        let GuardOutcome::Allow(session) = self.ctx.guard(RoleSet::ADMIN_ONLY) else {
            return false;
        };
        self.session = Some(session);
        self.refresh_users().await
    }

    pub async fn refresh_users(&mut self) -> bool {
        self.status.begin();
        let result = self.ctx.api().users().list(directory_query()).await;
        self.show(result.map(Some), None)
    }

    pub async fn register_student(&mut self, form: &StudentForm) -> bool {
        let payload = match form.validated() {
            Ok(payload) => payload,
            Err(e) => {
                self.status.fail(e.to_string());
                return false;
            }
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.students().create(&payload), || {
                api.users().list(directory_query())
            })
            .await;
        self.show(result, Some("User registered successfully."))
    }

    pub async fn register_teacher(&mut self, form: &TeacherForm) -> bool {
        let payload = match form.validated() {
            Ok(payload) => payload,
            Err(e) => {
                self.status.fail(e.to_string());
                return false;
            }
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.teachers().create(&payload), || {
                api.users().list(directory_query())
            })
            .await;
        self.show(result, Some("User registered successfully."))
    }

    pub async fn delete_user(&mut self, id: i64) -> bool {
        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.users().delete(id), || {
                api.users().list(directory_query())
            })
            .await;
        self.show(result, Some("User deleted."))
    }

    pub fn logout(&mut self) {
        self.ctx.logout();
    }

    /// Apply a fetched directory, unless the user has left the page
    fn show(&mut self, result: Result<Option<Vec<Value>>, ApiError>, notice: Option<&str>) -> bool {
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(Some(users)) => {
                self.counts = RoleCounts::from_users(&users);
                self.users = users;
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

fn directory_query() -> ListQuery {
    ListQuery::new().page(DIRECTORY_PAGE)
}

#[cfg(test)]
mod tests {
    use learnloop_client::mock::{MockReply, MockTransport};
    use learnloop_client::{HttpBody, Method};
    use learnloop_session::Role;
    use serde_json::json;

    use super::*;
    use crate::testing::context_for;

    fn directory(users: Value) -> MockReply {
        MockReply::json(200, users)
    }

    #[test]
    fn test_role_counts() {
        let counts = RoleCounts::from_users(&[
            json!({"role": "admin"}),
            json!({"role": "teacher"}),
            json!({"role": "student"}),
            json!({"role": "student"}),
            json!({"name": "no role"}),
        ]);
        assert_eq!(
            counts,
            RoleCounts {
                admins: 1,
                teachers: 1,
                students: 2
            }
        );
        assert_eq!(counts.total(), 4);
    }

    #[test_log::test(tokio::test)]
    async fn test_mount_loads_directory() {
        let mock = MockTransport::new();
        mock.on(
            Method::GET,
            "/api/users/",
            directory(json!([{"id": 1, "role": "admin"}, {"id": 2, "role": "teacher"}])),
        );
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx);

        assert!(page.mount().await);

        assert_eq!(page.users.len(), 2);
        assert_eq!(page.counts.teachers, 1);
        let sent = &mock.recorded_requests()[0];
        assert_eq!(sent.header("authorization"), Some("Bearer tok-admin"));
        assert!(sent.query.contains(&("limit".to_string(), "200".to_string())));
    }

    #[tokio::test]
    async fn test_teacher_is_turned_away_without_requests() {
        let mock = MockTransport::new();
        let ctx = context_for(&mock, Some(Role::Teacher), ROUTE);
        let mut page = AdminDashboard::new(ctx.clone());

        assert!(!page.mount().await);

        assert_eq!(mock.request_count(), 0);
        assert!(ctx.is_on(Route::Login));
    }

    #[test_log::test(tokio::test)]
    async fn test_register_student_then_refresh() {
        let mock = MockTransport::new();
        mock.on(Method::GET, "/api/users/", directory(json!([{"id": 1, "role": "admin"}])))
            .on(
                Method::GET,
                "/api/users/",
                directory(json!([{"id": 1, "role": "admin"}, {"id": 12, "role": "student"}])),
            );
        mock.on(Method::POST, "/api/students/", MockReply::json(201, json!({"id": 12})));
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx);
        page.mount().await;

        let form = StudentForm {
            full_name: "Noah Williams".to_string(),
            email: "noah@school.edu".to_string(),
            password: "secret1".to_string(),
            grade: "8".to_string(),
            class_name: "A".to_string(),
        };
        assert!(page.register_student(&form).await);

        assert_eq!(page.counts.students, 1);
        assert_eq!(page.status.notice.as_deref(), Some("User registered successfully."));
        let paths: Vec<String> = mock.recorded_requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/users/", "/api/students/", "/api/users/"]);
    }

    #[tokio::test]
    async fn test_invalid_teacher_form_sends_nothing() {
        let mock = MockTransport::new();
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx);

        let form = TeacherForm {
            full_name: "Tom Baker".to_string(),
            email: "tom@school.edu".to_string(),
            password: "secret1".to_string(),
            phone: "0412 345 678".to_string(),
            ..TeacherForm::default()
        };
        assert!(!page.register_teacher(&form).await);

        assert_eq!(mock.request_count(), 0);
        assert!(page.status.error.as_deref().unwrap().starts_with("Phone must be Australian"));
    }

    #[tokio::test]
    async fn test_register_teacher_posts_normalized_phone() {
        let mock = MockTransport::new();
        mock.on(Method::POST, "/api/teacher/", MockReply::json(201, json!({"id": 20})));
        mock.on(Method::GET, "/api/users/", directory(json!([{"id": 20, "role": "teacher"}])));
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx);

        let form = TeacherForm {
            full_name: "Tom Baker".to_string(),
            email: "tom@school.edu".to_string(),
            password: "secret1".to_string(),
            phone: "+61 412-345-678".to_string(),
            ..TeacherForm::default()
        };
        assert!(page.register_teacher(&form).await);

        let sent = &mock.requests_to("/api/teacher/")[0];
        assert!(matches!(sent.body, HttpBody::Bytes(_)));
        assert_eq!(sent.json_body().unwrap()["phone"], "+61412345678");
    }

    #[tokio::test]
    async fn test_duplicate_email_keeps_list() {
        let mock = MockTransport::new();
        mock.on(Method::GET, "/api/users/", directory(json!([{"id": 1, "role": "admin"}])));
        mock.on(
            Method::POST,
            "/api/students/",
            MockReply::detail(409, "Email already registered"),
        );
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx);
        page.mount().await;

        let form = StudentForm {
            full_name: "Noah Williams".to_string(),
            email: "noah@school.edu".to_string(),
            password: "secret1".to_string(),
            class_name: "A".to_string(),
            ..StudentForm::default()
        };
        assert!(!page.register_student(&form).await);

        assert_eq!(page.status.error.as_deref(), Some("Email already registered"));
        assert_eq!(page.users.len(), 1);
        assert_eq!(mock.requests_to("/api/users/").len(), 1);
    }

    #[tokio::test]
    async fn test_expired_session_during_delete_leaves_page() {
        let mock = MockTransport::new();
        mock.on(Method::DELETE, "/api/users/7", MockReply::detail(401, "Not authenticated"));
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx.clone());

        assert!(!page.delete_user(7).await);

        assert!(ctx.session().get().is_none());
        assert!(ctx.is_on(Route::Login));
        assert_eq!(page.status.error, None);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mount_after_expired_session_reports_failure() {
        let mock = MockTransport::new();
        mock.on(Method::GET, "/api/users/", MockReply::detail(401, "Token expired"));
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx.clone());

        assert!(!page.mount().await);

        assert!(ctx.session().get().is_none());
        assert!(ctx.is_on(Route::Login));
        assert!(page.users.is_empty());
    }

    #[tokio::test]
    async fn test_mount_with_server_error_reports_failure() {
        let mock = MockTransport::new();
        mock.on(Method::GET, "/api/users/", MockReply::raw(500, "oops"));
        let ctx = context_for(&mock, Some(Role::Admin), ROUTE);
        let mut page = AdminDashboard::new(ctx.clone());

        assert!(!page.mount().await);

        assert_eq!(
            page.status.error.as_deref(),
            Some("Request failed with status 500")
        );
        assert!(ctx.is_on(ROUTE));
    }
}
