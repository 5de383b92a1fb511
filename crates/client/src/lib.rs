//! LearnLoop API Access Layer
//!
//! The one component allowed to talk to the backend:
//! - `ApiClient::request` attaches the session credential, encodes the body,
//!   normalizes error responses, and signs the user out on a 401
//! - `ReqwestTransport` for real HTTP, `MockTransport` for tests
//! - Typed wrappers for every backend endpoint the client uses

pub mod api;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod mock;
pub mod request;
pub mod routes;

use std::sync::Arc;

use learnloop_common::{ClientConfig, ConfigError};

pub use api::ApiClient;
pub use endpoints::{
    ChatReply, Collection, ListQuery, MaterialUpload, ModerationAction, NewStudent, NewTeacher,
    TimetableDay, TimetableSlot,
};
pub use error::{ApiError, ErrorDetail, FieldError};
pub use request::{
    FilePart, HttpBody, HttpRequest, HttpResponse, MultipartForm, RequestBody, RequestOptions,
};
pub use reqwest::Method;
pub use routes::{PerRole, RoleRoutes};

/// Moves one prepared request over the wire.
///
/// Implementations send exactly once and never retry; a request that never
/// reached the backend is `ApiError::Transport`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Factory for creating Transport implementations
pub struct TransportFactory;

impl TransportFactory {
    pub fn create(config: &ClientConfig) -> Result<Arc<dyn Transport>, ApiError> {
        match config.transport.as_str() {
            "http" => {
                tracing::info!(api_base = %config.api_base, "Creating HTTP transport");
                Ok(Arc::new(http::ReqwestTransport::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock transport");
                Ok(Arc::new(mock::MockTransport::new()))
            }
            provider => Err(ConfigError::UnknownTransport(provider.to_string()).into()),
        }
    }
}
