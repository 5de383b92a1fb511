//! School assistant chatbot

use learnloop_session::Role;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::request::RequestOptions;

#[derive(Debug, Clone, Serialize)]
struct ChatPrompt<'a> {
    message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ApiClient {
    /// Ask the assistant a question on behalf of `role`.
    ///
    /// An empty response (the session expired mid-call) yields `None`.
    pub async fn ask(&self, role: Role, message: &str) -> Result<Option<ChatReply>, ApiError> {
        let path = self.routes().chat.require(role, "chat")?.to_string();
        let options = RequestOptions::json(Method::POST, &ChatPrompt { message })?;
        let Some(value) = self.request(&path, options).await? else {
            return Ok(None);
        };
        let reply: ChatReply =
            serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(Some(reply))
    }
}
