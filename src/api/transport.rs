//! HTTP transport abstraction under the API client.
//!
//! The client speaks to the network through the `HttpTransport` trait so the
//! refresh-and-retry logic can be exercised against a scripted transport in
//! tests. Production uses `ReqwestTransport`.
//!
//! Multipart bodies are described by the owned `MultipartForm` type rather
//! than `reqwest::multipart::Form`: reqwest forms are consumed on send, and
//! a request must be rebuildable for the one retry after a token refresh.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

pub use reqwest::{Method, StatusCode};

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// body read failure, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be constructed (unserializable body, bad MIME).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

/// Body of an outgoing request, one variant per entry point.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// Owned description of a multipart form.
///
/// Holds part data by value so the same form can be sent twice (initial
/// attempt plus the post-refresh retry). Converted to a real multipart body
/// by the transport, which also generates the boundary; the client never
/// sets a content-type for these requests.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

#[derive(Debug, Clone)]
enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        data: Vec<u8>,
    },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Add a file field with the given filename and MIME type.
    pub fn file(mut self, name: &str, file_name: &str, mime: &str, data: Vec<u8>) -> Self {
        self.parts.push(FormPart::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            data,
        });
        self
    }
}

/// A fully-built outgoing request, ready for a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Ordered header list; names are matched case-insensitively by servers.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Value of the first header with the given name, if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully-read incoming response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// Declared `Content-Length`, when the server sent one.
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// 401/403 -- eligible for one refresh-and-retry cycle.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status.as_u16(), 401 | 403)
    }

    /// 204, or an explicit zero content length: success with no body.
    pub fn is_empty(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.content_length == Some(0)
    }
}

/// Trait abstracting the HTTP call for testability.
///
/// In production, `ReqwestTransport` performs the real network call.
/// In tests, a scripted implementation controls statuses and bodies.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                builder.body(bytes)
            }
            // reqwest generates the multipart boundary and content-type here.
            RequestBody::Multipart(form) => builder.multipart(build_form(form)?),
        };

        let response = builder.send().await?;
        let status = response.status();
        let content_length = response.content_length();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            content_length,
            body,
        })
    }
}

fn build_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    use reqwest::multipart;

    let mut out = multipart::Form::new();
    for part in form.parts {
        out = match part {
            FormPart::Text { name, value } => out.text(name, value),
            FormPart::File {
                name,
                file_name,
                mime,
                data,
            } => {
                let part = multipart::Part::bytes(data)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| TransportError::InvalidRequest(format!("bad MIME type: {}", e)))?;
                out.part(name, part)
            }
        };
    }
    Ok(out)
}
