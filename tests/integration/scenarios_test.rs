//! End-to-end page flows against a mock backend over real HTTP

mod common;

use common::{detail, TestApp};
use learnloop_client::{FilePart, MaterialUpload};
use learnloop_common::Route;
use learnloop_pages::{LoginPage, TeacherDashboard};
use learnloop_session::Role;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

/// Mount the three calls the teacher dashboard makes on load
async fn teacher_backend(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "name": "Tom Baker", "email": "tom@school.edu", "role": "teacher"
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/teacher/schedule/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"schedule": []})))
        .mount(&app.server)
        .await;
}

// Scenario A: admin login stores the session and opens the admin dashboard
#[test_log::test(tokio::test)]
async fn test_admin_login_opens_admin_dashboard() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "amara@school.edu", "password": "admin123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok1",
            "token_type": "bearer",
            "user": {"id": 1, "name": "Amara", "email": "amara@school.edu", "role": "admin"}
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut login = LoginPage::new(app.ctx.clone());
    assert!(login.submit("amara@school.edu", "admin123").await);

    let session = app.ctx.session().get().expect("session stored after login");
    assert_eq!(session.credential, "tok1");
    assert_eq!(session.identity.role, Role::Admin);
    assert!(app.ctx.is_on(Route::AdminDashboard));
    assert_eq!(login.status.error, None);
    Ok(())
}

// Scenario B: rejected credentials leave the session alone and show the detail
#[test_log::test(tokio::test)]
async fn test_invalid_credentials_shown_inline() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(detail("Invalid credentials")))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut login = LoginPage::new(app.ctx.clone());
    assert!(!login.submit("amara@school.edu", "admin123").await);

    assert_eq!(login.status.error.as_deref(), Some("Invalid credentials"));
    assert!(app.ctx.session().get().is_none());
    assert!(app.ctx.is_on(Route::Login));
    Ok(())
}

// Scenario C: a teacher page with no session redirects without calling out
#[test_log::test(tokio::test)]
async fn test_teacher_page_without_session_redirects() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    app.ctx.navigate(Route::TeacherDashboard);

    let mut page = TeacherDashboard::new(app.ctx.clone());
    assert!(!page.mount().await);

    assert!(app.ctx.is_on(Route::Login));
    assert_eq!(app.request_count().await, 0);
    assert!(page.profile.is_none());
    Ok(())
}

// Scenario D: a successful upload is followed by a refetch that shows it
#[test_log::test(tokio::test)]
async fn test_upload_refetches_materials() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Teacher, Route::TeacherDashboard).await?;
    teacher_backend(&app).await;
    Mock::given(method("GET"))
        .and(path("/api/materials/mine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/materials/mine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 40, "title": "Forces worksheet", "file_path": "uploads/2/forces.pdf"}
        ])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/materials/"))
        .and(header("authorization", "Bearer tok-teacher"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("Forces worksheet"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 40})))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut page = TeacherDashboard::new(app.ctx.clone());
    assert!(page.mount().await);
    assert!(page.materials.is_empty());

    let upload = MaterialUpload::new(
        "Forces worksheet",
        "9",
        FilePart::new("forces.pdf", b"%PDF-1.4".to_vec()).with_content_type("application/pdf"),
    )
    .with_subject("Physics");
    assert!(page.upload(upload).await);

    let titles: Vec<&str> = page
        .materials
        .iter()
        .filter_map(|m| m["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Forces worksheet"]);
    assert_eq!(
        page.material_link(&page.materials[0]),
        format!("{}/uploads/2/forces.pdf", app.server.uri())
    );
    Ok(())
}

// Scenario E: a 401 on the teacher dashboard signs out despite unsaved input
#[test_log::test(tokio::test)]
async fn test_expired_session_on_teacher_dashboard() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Teacher, Route::TeacherDashboard).await?;
    teacher_backend(&app).await;
    Mock::given(method("GET"))
        .and(path("/api/materials/mine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/teacher/notifications/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(detail("Token expired")))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut page = TeacherDashboard::new(app.ctx.clone());
    assert!(page.mount().await);
    page.notification_draft = "Excursion forms due Friday".to_string();

    assert!(!page.send_notification().await);

    assert!(app.ctx.session().get().is_none());
    assert!(app.ctx.is_on(Route::Login));
    assert_eq!(page.status.error, None);
    Ok(())
}
