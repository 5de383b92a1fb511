//! Reqwest HTTP Transport
//!
//! Sends prepared requests to the backend. Multipart bodies are handed to
//! reqwest as forms so it writes the boundary and content type itself.

use learnloop_common::ClientConfig;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::error::ApiError;
use crate::request::{HttpBody, HttpRequest, HttpResponse, MultipartForm};
use crate::Transport;

/// Real HTTP transport backed by a shared reqwest client
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("could not build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

fn into_form(form: MultipartForm) -> Result<Form, ApiError> {
    let mut out = Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for (name, file) in form.files {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| ApiError::Encode(format!("invalid content type {}: {}", content_type, e)))?;
        }
        out = out.part(name, part);
    }
    Ok(out)
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.http.request(request.method.clone(), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            HttpBody::Empty => builder,
            HttpBody::Bytes(bytes) => builder.body(bytes),
            HttpBody::Multipart(form) => builder.multipart(into_form(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Parse(format!("failed to read response body: {}", e)))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
