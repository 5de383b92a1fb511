//! Messages between school members

use learnloop_session::Role;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiClient;
use crate::endpoints::list_from;
use crate::endpoints::materials::ModerationAction;
use crate::error::ApiError;
use crate::request::RequestOptions;

#[derive(Debug, Clone, Serialize)]
struct Content<'a> {
    content: &'a str,
}

impl ApiClient {
    pub async fn role_messages(&self, role: Role) -> Result<Vec<Value>, ApiError> {
        let path = self.routes().messages.require(role, "messages")?.to_string();
        let value = self.request(&path, RequestOptions::get()).await?;
        Ok(list_from(value, Some("messages")))
    }

    pub async fn send_message(&self, role: Role, content: &str) -> Result<Option<Value>, ApiError> {
        let path = self
            .routes()
            .message_send
            .require(role, "message send")?
            .to_string();
        let options = RequestOptions::json(Method::POST, &Content { content })?;
        self.request(&path, options).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<Option<Value>, ApiError> {
        let path = format!("{}/{}", self.routes().message_moderation, id);
        self.request(&path, RequestOptions::delete()).await
    }

    pub async fn moderate_message(
        &self,
        id: i64,
        action: ModerationAction,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!(
            "{}/{}/{}",
            self.routes().message_moderation,
            id,
            action.as_str()
        );
        self.request(&path, RequestOptions::with_method(Method::POST))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use learnloop_common::ClientConfig;
    use learnloop_session::{HistoryNavigator, Identity, SessionStore, TabSessionStore};
    use serde_json::json;

    use super::*;
    use crate::mock::{MockReply, MockTransport};
    use crate::routes::{PerRole, RoleRoutes};

    fn client(mock: &MockTransport, role: Role) -> ApiClient {
        let store = TabSessionStore::new();
        store.set(
            Identity {
                id: 5,
                name: "Priya".to_string(),
                email: "priya@school.edu".to_string(),
                role,
            },
            "tok5".to_string(),
        );
        ApiClient::new(
            ClientConfig::default(),
            Arc::new(mock.clone()),
            Arc::new(store),
            Arc::new(HistoryNavigator::default()),
        )
    }

    #[tokio::test]
    async fn test_messages_follow_role_route() {
        let mock = MockTransport::new();
        mock.on(
            Method::GET,
            "/teacher/messages",
            MockReply::json(200, json!([{"id": 1, "content": "Hello"}])),
        );

        let messages = client(&mock, Role::Teacher)
            .role_messages(Role::Teacher)
            .await
            .unwrap();

        assert_eq!(messages[0]["content"], "Hello");
    }

    #[tokio::test]
    async fn test_custom_routes_are_honoured() {
        let mock = MockTransport::new();
        mock.on(Method::POST, "/v2/chat/post", MockReply::no_content());
        let routes = RoleRoutes {
            message_send: PerRole {
                student: Some("/v2/chat/post".to_string()),
                ..PerRole::default()
            },
            ..RoleRoutes::default()
        };
        let client = client(&mock, Role::Student).with_routes(routes);

        client.send_message(Role::Student, "Is there class today?").await.unwrap();

        let sent = mock.requests_to("/v2/chat/post")[0].json_body().unwrap();
        assert_eq!(sent["content"], "Is there class today?");
    }

    #[tokio::test]
    async fn test_delete_and_flag_use_moderation_prefix() {
        let mock = MockTransport::new();
        mock.on(Method::DELETE, "/admin/messages/8", MockReply::no_content());
        mock.on(Method::POST, "/admin/messages/8/flag", MockReply::no_content());
        let client = client(&mock, Role::Admin);

        client.moderate_message(8, ModerationAction::Flag).await.unwrap();
        client.delete_message(8).await.unwrap();

        let paths: Vec<String> = mock.recorded_requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/admin/messages/8/flag", "/admin/messages/8"]);
    }
}
