//! Behaviour of the API chokepoint over real HTTP

mod common;

use std::time::Duration;

use common::{detail, TestApp};
use learnloop_client::{ApiError, Method, RequestOptions};
use learnloop_common::{ClientConfig, Route};
use learnloop_pages::PageContext;
use learnloop_session::Role;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test_log::test(tokio::test)]
async fn test_401_anywhere_ends_the_session() -> anyhow::Result<()> {
    let calls = [
        (Method::GET, "/api/auth/me"),
        (Method::GET, "/admin/messages"),
        (Method::POST, "/teacher/notifications/send"),
        (Method::PUT, "/api/teacher/timetable"),
        (Method::PATCH, "/api/students/7"),
        (Method::DELETE, "/api/materials/3"),
    ];

    for (verb, route) in calls {
        let app = TestApp::signed_in(Role::Admin, Route::AdminDashboard).await?;
        Mock::given(method(verb.as_str()))
            .and(path(route))
            .respond_with(ResponseTemplate::new(401).set_body_json(detail("Token expired")))
            .expect(1)
            .mount(&app.server)
            .await;

        let result = app
            .api()
            .request(route, RequestOptions::with_method(verb.clone()))
            .await;

        assert_eq!(result, Ok(None), "{} {}", verb, route);
        assert!(app.ctx.session().get().is_none(), "{} {}", verb, route);
        assert!(app.ctx.is_on(Route::Login), "{} {}", verb, route);
    }
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_server_error_is_not_retried() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Teacher, Route::TeacherDashboard).await?;
    Mock::given(method("GET"))
        .and(path("/api/materials/mine"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&app.server)
        .await;

    let err = app
        .api()
        .request("/api/materials/mine", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status 500");
    assert_eq!(err.status(), Some(500));
    assert_eq!(app.request_count().await, 1);
    assert!(app.ctx.session().get().is_some());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_no_content_is_empty_result() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Admin, Route::AdminDashboard).await?;
    Mock::given(method("DELETE"))
        .and(path("/api/users/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&app.server)
        .await;

    let result = app.api().request("/api/users/9", RequestOptions::delete()).await;

    assert_eq!(result, Ok(None));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_validation_list_becomes_one_message() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Admin, Route::AdminDashboard).await?;
    Mock::given(method("POST"))
        .and(path("/api/students/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
                {"loc": ["body", "class"], "msg": "field required", "type": "missing"}
            ]
        })))
        .mount(&app.server)
        .await;

    let options = RequestOptions::json(Method::POST, &json!({"email": "nope"}))?;
    let err = app.api().request("/api/students/", options).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "email: value is not a valid email address; class: field required"
    );
    assert_eq!(err.status(), Some(422));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_unrecognized_error_body_reports_status() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Student, Route::StudentDashboard).await?;
    Mock::given(method("GET"))
        .and(path("/student/materials"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .mount(&app.server)
        .await;

    let err = app
        .api()
        .request("/student/materials", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status 403");
    assert!(app.ctx.session().get().is_some());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_unreachable_backend_is_transport_error() -> anyhow::Result<()> {
    let config =
        ClientConfig::new("http://127.0.0.1:9").with_request_timeout(Duration::from_secs(5));
    let ctx = PageContext::for_tab(config)?;

    let err = ctx
        .api()
        .request("/api/auth/me", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.to_string().starts_with("Request failed: "));
    assert!(ctx.is_on(Route::Login));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_bearer_credential_is_attached() -> anyhow::Result<()> {
    let app = TestApp::signed_in(Role::Teacher, Route::TeacherDashboard).await?;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer tok-teacher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&app.server)
        .await;

    let profile = app.api().profile().await?;

    assert_eq!(profile, Some(json!({"id": 2})));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_signed_out_request_has_no_credential() -> anyhow::Result<()> {
    let app = TestApp::start().await?;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&app.server)
        .await;

    app.api().request("/health", RequestOptions::get()).await?;

    let requests = app.server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    Ok(())
}
