//! Authenticated HTTP client for the StaffDesk API.
//!
//! Every request goes out with the stored bearer token attached. On a 401 or
//! 403 the client refreshes the token through a single shared exchange --
//! concurrent failures collapse onto one refresh call -- and re-issues the
//! request exactly once. Responses are normalized for three transport
//! shapes: parsed JSON, raw bytes, and JSON after a multipart upload.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::events::{SessionEvent, SessionEvents};
use crate::session::SessionStore;

use super::error::{ApiError, GENERIC_ERROR_MESSAGE};
use super::transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, ReqwestTransport, RequestBody,
};
use super::types::{ErrorBody, RefreshResponse};

/// Endpoint that exchanges a stale token for a fresh one.
const REFRESH_PATH: &str = "/api/auth/refresh";

/// API client wrapper for StaffDesk backend communication.
///
/// Owns the session store (read on every request), the auth-lost event
/// channel, and the refresh gate that serializes token exchanges. Generic
/// over the transport so tests can script responses; production code uses
/// the `ReqwestTransport` default.
pub struct ApiClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    base_url: String,
    store: Arc<dyn SessionStore>,
    events: SessionEvents,
    /// Serializes refresh attempts so concurrent 401s share one network call.
    refresh_gate: Mutex<()>,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client against the given base URL with the default transport.
    pub fn new(base_url: &str, store: Arc<dyn SessionStore>) -> Self {
        Self::with_transport(ReqwestTransport::new(), base_url, store)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(transport: T, base_url: &str, store: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            events: SessionEvents::new(),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store backing this client.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Event channel publishing `AuthenticationLost` on terminal failures.
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    // ── JSON entry point ─────────────────────────────────────────────────

    /// Issue a JSON request against a relative API path.
    ///
    /// Sends `Content-Type: application/json` unless a caller header
    /// overrides it. A 204 response, or one with an explicit zero content
    /// length, yields `None`; anything else is parsed as `R`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<Option<R>, ApiError> {
        let body = match body {
            Some(value) => RequestBody::Json(value),
            None => RequestBody::Empty,
        };
        let response = self
            .dispatch(method, path, Some("application/json"), headers, body)
            .await?;
        decode_json(response)
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>, ApiError> {
        self.request(Method::GET, path, None, &[]).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<R>, ApiError> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?), &[])
            .await
    }

    /// POST with no request body (actions addressed entirely by the path).
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>, ApiError> {
        self.request(Method::POST, path, None, &[]).await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<R>, ApiError> {
        self.request(Method::PUT, path, Some(serde_json::to_value(body)?), &[])
            .await
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let _: Option<Value> = self.request(Method::DELETE, path, None, &[]).await?;
        Ok(())
    }

    // ── Binary entry point ───────────────────────────────────────────────

    /// Fetch a raw payload (document downloads, exports).
    ///
    /// No content-type is set automatically; the caller supplies one via
    /// `headers` if the endpoint needs it. 204 or zero content length
    /// yields `None`.
    pub async fn request_bytes(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let response = self
            .dispatch(method, path, None, headers, RequestBody::Empty)
            .await?;
        if response.is_empty() {
            return Ok(None);
        }
        Ok(Some(response.body))
    }

    pub async fn fetch_bytes(&self, path: &str) -> Result<Option<Vec<u8>>, ApiError> {
        self.request_bytes(Method::GET, path, &[]).await
    }

    // ── Multipart entry point ────────────────────────────────────────────

    /// Send a multipart form and parse the JSON response.
    ///
    /// The content-type (and boundary) comes from the transport layer; the
    /// client must not set one itself. 204 yields `None`.
    pub async fn request_multipart<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: MultipartForm,
        headers: &[(&str, &str)],
    ) -> Result<Option<R>, ApiError> {
        let response = self
            .dispatch(method, path, None, headers, RequestBody::Multipart(form))
            .await?;
        if response.status.as_u16() == 204 {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&response.body)?))
    }

    /// Multipart POST convenience (the upload default).
    pub async fn upload<R: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<Option<R>, ApiError> {
        self.request_multipart(Method::POST, path, form, &[]).await
    }

    // ── Shared dispatch ──────────────────────────────────────────────────

    /// Issue a request with the stored token attached, running the
    /// refresh-and-retry cycle on authentication failure.
    ///
    /// All three entry points funnel through here, so the single-retry cap
    /// and the terminal-failure side effects live in exactly one place.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        default_content_type: Option<&str>,
        extra_headers: &[(&str, &str)],
        body: RequestBody,
    ) -> Result<HttpResponse, ApiError> {
        let token = self.store.token()?;
        let request = self.build_request(
            method.clone(),
            path,
            default_content_type,
            extra_headers,
            token.as_deref(),
            body.clone(),
        );
        let response = self.transport.execute(request).await?;

        if !response.is_auth_failure() {
            return classify(response);
        }

        // A 401/403 on a call that went out without a credential cannot be
        // repaired by a refresh (bad login attempt, for instance). There is
        // no session to tear down, so no event fires.
        let Some(stale) = token else {
            return Err(ApiError::SessionExpired);
        };

        let fresh = self.refresh_token(&stale).await?;
        log::debug!("retrying {} {} with refreshed token", method, path);

        let retry = self.build_request(
            method,
            path,
            default_content_type,
            extra_headers,
            Some(&fresh),
            body,
        );
        let response = self.transport.execute(retry).await?;

        if response.is_auth_failure() {
            // The fresh token was rejected too; the session is over.
            self.terminal_auth_failure();
            return Err(ApiError::SessionExpired);
        }
        classify(response)
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        default_content_type: Option<&str>,
        extra_headers: &[(&str, &str)],
        token: Option<&str>,
        body: RequestBody,
    ) -> HttpRequest {
        let mut headers: Vec<(String, String)> = Vec::new();
        if let Some(content_type) = default_content_type {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        // No stored token means no Authorization header at all.
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        // Caller headers replace defaults of the same name.
        for (name, value) in extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.to_string(), value.to_string()));
        }

        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        }
    }

    // ── Refresh coordination ─────────────────────────────────────────────

    /// Exchange a stale token for a fresh one, collapsing concurrent callers
    /// onto a single network call.
    ///
    /// Callers serialize on the refresh gate. Whoever enters first performs
    /// the exchange; everyone queued behind re-reads the store on entry and
    /// finds either the fresh token (success) or nothing at all (the
    /// exchange failed and the session was torn down).
    async fn refresh_token(&self, stale: &str) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;

        match self.store.token()? {
            Some(current) if current != stale => return Ok(current),
            Some(_) => {}
            None => return Err(ApiError::SessionExpired),
        }

        log::info!("access token rejected, refreshing");
        let request = HttpRequest {
            method: Method::POST,
            url: format!("{}{}", self.base_url, REFRESH_PATH),
            headers: vec![("Authorization".to_string(), format!("Bearer {}", stale))],
            body: RequestBody::Empty,
        };

        let fresh = match self.transport.execute(request).await {
            Ok(response) if response.status.is_success() => {
                serde_json::from_slice::<RefreshResponse>(&response.body)
                    .ok()
                    .map(|r| r.token)
            }
            // Non-2xx and network failures end the session the same way.
            _ => None,
        };

        match fresh {
            Some(token) => {
                self.store.set_token(&token)?;
                Ok(token)
            }
            None => {
                self.terminal_auth_failure();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// Clear the persisted session and broadcast the loss.
    ///
    /// The event fires only when a session was actually present, so
    /// overlapping terminal failures collapse to one notification.
    fn terminal_auth_failure(&self) {
        match self.store.clear() {
            Ok(true) => {
                log::warn!("session terminated: credential rejected after refresh");
                self.events.emit(SessionEvent::AuthenticationLost);
            }
            Ok(false) => {}
            Err(e) => log::error!("failed to clear session storage: {}", e),
        }
    }
}

/// Map non-2xx responses to `ApiError::Api`, passing successes through.
/// Auth failures never reach here; `dispatch` resolves them first.
fn classify(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.status.is_success() {
        return Ok(response);
    }

    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    Err(ApiError::Api {
        status: response.status.as_u16(),
        message,
    })
}

fn decode_json<R: DeserializeOwned>(response: HttpResponse) -> Result<Option<R>, ApiError> {
    if response.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&response.body)?))
}
