//! Common fixtures for the end-to-end tests
//!
//! Each test gets its own `wiremock` backend and a fresh browser tab:
//! an empty session store and a navigator, wired to the real reqwest
//! transport.

use learnloop_client::ApiClient;
use learnloop_common::{ClientConfig, Route};
use learnloop_pages::PageContext;
use learnloop_session::{Identity, Role};
use serde_json::{json, Value};
use wiremock::MockServer;

/// A mock backend plus one tab pointed at it
pub struct TestApp {
    pub server: MockServer,
    pub ctx: PageContext,
}

impl TestApp {
    pub async fn start() -> anyhow::Result<Self> {
        let server = MockServer::start().await;
        let ctx = PageContext::for_tab(ClientConfig::new(server.uri()))?;
        Ok(Self { server, ctx })
    }

    /// Start with `role` already signed in and the tab on `route`
    pub async fn signed_in(role: Role, route: Route) -> anyhow::Result<Self> {
        let app = Self::start().await?;
        app.ctx
            .session()
            .set(identity(role), format!("tok-{}", role));
        app.ctx.navigate(route);
        Ok(app)
    }

    #[allow(dead_code)]
    pub fn api(&self) -> &ApiClient {
        self.ctx.api()
    }

    /// Requests the backend has seen so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

pub fn identity(role: Role) -> Identity {
    match role {
        Role::Admin => Identity {
            id: 1,
            name: "Amara".to_string(),
            email: "amara@school.edu".to_string(),
            role,
        },
        Role::Teacher => Identity {
            id: 2,
            name: "Tom Baker".to_string(),
            email: "tom@school.edu".to_string(),
            role,
        },
        Role::Student => Identity {
            id: 3,
            name: "Noah Williams".to_string(),
            email: "noah@school.edu".to_string(),
            role,
        },
    }
}

/// Backend error body in its `{"detail": ...}` shape
#[allow(dead_code)]
pub fn detail(message: &str) -> Value {
    json!({ "detail": message })
}
