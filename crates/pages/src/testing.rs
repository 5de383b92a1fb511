//! Test fixtures shared by the page controller tests

use std::sync::Arc;

use learnloop_client::mock::MockTransport;
use learnloop_client::ApiClient;
use learnloop_common::{ClientConfig, Route};
use learnloop_session::{HistoryNavigator, Identity, Role, SessionStore, TabSessionStore};

use crate::context::PageContext;

pub fn identity(role: Role) -> Identity {
    match role {
        Role::Admin => Identity {
            id: 1,
            name: "Amara Okafor".to_string(),
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

/// Page context over `mock`, signed in as `role` (or signed out), on `route`
pub fn context_for(mock: &MockTransport, role: Option<Role>, route: Route) -> PageContext {
    let store = TabSessionStore::new();
    if let Some(role) = role {
        store.set(identity(role), format!("tok-{}", role));
    }
    let api = ApiClient::new(
        ClientConfig::default(),
        Arc::new(mock.clone()),
        Arc::new(store),
        Arc::new(HistoryNavigator::starting_at(route)),
    );
    PageContext::new(api)
}
