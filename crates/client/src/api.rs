//! The API chokepoint
//!
//! Every page and form reaches the backend through `ApiClient::request`.

use std::sync::Arc;

use learnloop_common::{ClientConfig, Route};
use learnloop_session::{Navigator, SessionStore};

use crate::error::ApiError;
use crate::request::{HttpBody, HttpRequest, RequestBody, RequestOptions};
use crate::routes::RoleRoutes;
use crate::{Transport, TransportFactory};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Whether a call is made on behalf of the signed-in session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Attach the credential; a 401 ends the session
    Session,
    /// No credential; a 401 is an ordinary error (login)
    Anonymous,
}

/// Session-aware client for the backend REST service.
///
/// Cheap to clone; clones share the transport, session store and navigator.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    routes: RoleRoutes,
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.config.api_base)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            routes: RoleRoutes::default(),
            transport,
            session,
            navigator,
        }
    }

    /// Client whose transport is picked by `config.transport`
    pub fn from_config(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = TransportFactory::create(&config)?;
        Ok(Self::new(config, transport, session, navigator))
    }

    pub fn with_routes(mut self, routes: RoleRoutes) -> Self {
        self.routes = routes;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn routes(&self) -> &RoleRoutes {
        &self.routes
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Call the backend as the signed-in user.
    ///
    /// - `Ok(Some(json))` for a success with a body
    /// - `Ok(None)` for 204, an empty body, or a 401 (the session has been
    ///   cleared and the user sent to login)
    /// - `Err` with a normalized, human-readable message otherwise
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        self.dispatch(path, options, Auth::Session).await
    }

    /// Call the backend without a credential, e.g. to log in.
    ///
    /// A 401 here is reported like any other rejection and leaves the
    /// session untouched.
    pub async fn request_unauthenticated(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        self.dispatch(path, options, Auth::Anonymous).await
    }

    fn prepare(&self, path: &str, options: RequestOptions, auth: Auth) -> Result<HttpRequest, ApiError> {
        let mut request = HttpRequest {
            method: options.method,
            path: path.to_string(),
            url: self.config.url_for(path),
            headers: Vec::new(),
            query: options.query,
            body: HttpBody::Empty,
        };

        if auth == Auth::Session {
            if let Some(session) = self.session.get() {
                request.set_header("Authorization", session.bearer());
            }
        }

        let multipart = matches!(options.body, Some(RequestBody::Multipart(_)));
        request.body = match options.body {
            None => HttpBody::Empty,
            Some(RequestBody::Json(value)) => {
                request.set_header("Content-Type", JSON_CONTENT_TYPE);
                HttpBody::Bytes(
                    serde_json::to_vec(&value).map_err(|e| ApiError::Encode(e.to_string()))?,
                )
            }
            Some(RequestBody::Multipart(form)) => HttpBody::Multipart(form),
        };

        for (name, value) in options.headers {
            // the transport writes the multipart boundary
            if multipart && name.eq_ignore_ascii_case("content-type") {
                tracing::debug!(path, "Ignoring caller content type on multipart body");
                continue;
            }
            request.set_header(name, value);
        }

        Ok(request)
    }

    async fn dispatch(
        &self,
        path: &str,
        options: RequestOptions,
        auth: Auth,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let request = self.prepare(path, options, auth)?;
        let method = request.method.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "Request did not reach backend");
                return Err(e);
            }
        };

        tracing::debug!(%method, path, status = response.status, "Backend responded");

        if response.status == 401 && auth == Auth::Session {
            tracing::warn!(%method, path, "Backend rejected credential, signing out");
            self.session.clear();
            self.navigator.navigate(Route::Login);
            return Ok(None);
        }

        if !response.is_success() {
            let err = ApiError::rejected(response.status, &response.body);
            tracing::warn!(%method, path, status = response.status, error = %err, "Request rejected");
            return Err(err);
        }

        if response.status == 204 || response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&response.body)
            .map(Some)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
