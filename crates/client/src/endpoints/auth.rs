//! Authentication endpoints

use learnloop_common::Route;
use learnloop_session::{Identity, Role, Session};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::request::RequestOptions;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PROFILE_PATH: &str = "/api/auth/me";

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    id: i64,
    name: String,
    email: String,
    role: String,
}

impl ApiClient {
    /// Exchange credentials for a session.
    ///
    /// Does not touch the session store; the caller decides when to store
    /// the result. Rejections (including 401) carry the backend's message.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let options = RequestOptions::json(Method::POST, &body)?;

        let value = self
            .request_unauthenticated(LOGIN_PATH, options)
            .await?
            .ok_or_else(|| ApiError::Parse("empty login response".to_string()))?;

        let response: LoginResponse =
            serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;

        let role: Role = response
            .user
            .role
            .parse()
            .map_err(|_| ApiError::UnsupportedRole(response.user.role.clone()))?;

        if response.access_token.trim().is_empty() {
            return Err(ApiError::Parse("login response carried no access token".to_string()));
        }

        tracing::info!(user_id = response.user.id, %role, "Login accepted");

        Ok(Session::new(
            Identity {
                id: response.user.id,
                name: response.user.name,
                email: response.user.email,
                role,
            },
            response.access_token,
        ))
    }

    /// Profile of the signed-in user
    pub async fn profile(&self) -> Result<Option<serde_json::Value>, ApiError> {
        self.request(PROFILE_PATH, RequestOptions::get()).await
    }

    /// End the session locally and return to login
    pub fn logout(&self) {
        tracing::info!("Logging out");
        self.session().clear();
        self.navigator().navigate(Route::Login);
    }
}
