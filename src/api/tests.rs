//! Unit tests for the authenticated client and endpoint bindings.
//!
//! The transport trait is the seam: a scripted transport feeds canned
//! responses for the decode/error paths, and a fake token-aware backend
//! exercises the refresh-and-retry cycle, including the single-flight
//! guarantee under concurrency.

#[cfg(test)]
mod client_tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::{json, Value};

    use crate::api::client::ApiClient;
    use crate::api::error::{ApiError, GENERIC_ERROR_MESSAGE};
    use crate::api::transport::{
        HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, RequestBody,
        TransportError,
    };
    use crate::events::SessionEvent;
    use crate::session::{MemoryStore, SessionStore};

    use super::support::{empty_ok, no_content, response, scripted, session, BASE};

    // ── Token-aware fake backend ─────────────────────────────────────────

    /// Simulates a backend with protected endpoints plus the refresh
    /// endpoint. Protected endpoints accept exactly one token; refresh
    /// either hands out `next_token` or fails with 401.
    #[derive(Clone)]
    struct FakeBackend {
        state: Arc<BackendState>,
    }

    struct BackendState {
        /// Token the protected endpoints currently accept.
        accepted: Mutex<String>,
        /// Token refresh hands out; `None` makes refresh fail.
        next_token: Option<String>,
        /// Reject protected endpoints no matter the token.
        always_reject: bool,
        /// Refresh does not complete until this many rejections were served.
        hold_refresh_until_rejections: u32,
        data_calls: AtomicU32,
        refresh_calls: AtomicU32,
        rejections: AtomicU32,
        requests: Mutex<Vec<HttpRequest>>,
    }

    fn backend(
        accepted: &str,
        next_token: Option<&str>,
        always_reject: bool,
        hold_refresh_until_rejections: u32,
    ) -> FakeBackend {
        FakeBackend {
            state: Arc::new(BackendState {
                accepted: Mutex::new(accepted.to_string()),
                next_token: next_token.map(str::to_string),
                always_reject,
                hold_refresh_until_rejections,
                data_calls: AtomicU32::new(0),
                refresh_calls: AtomicU32::new(0),
                rejections: AtomicU32::new(0),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    impl FakeBackend {
        fn data_calls(&self) -> u32 {
            self.state.data_calls.load(Ordering::SeqCst)
        }

        fn refresh_calls(&self) -> u32 {
            self.state.refresh_calls.load(Ordering::SeqCst)
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.state.requests.lock().unwrap().clone()
        }
    }

    impl HttpTransport for FakeBackend {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.state.requests.lock().unwrap().push(request.clone());

            if request.url.ends_with("/api/auth/refresh") {
                self.state.refresh_calls.fetch_add(1, Ordering::SeqCst);

                let gate = self.state.hold_refresh_until_rejections;
                while self.state.rejections.load(Ordering::SeqCst) < gate {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }

                return match &self.state.next_token {
                    Some(token) => {
                        *self.state.accepted.lock().unwrap() = token.clone();
                        Ok(response(200, &json!({ "token": token }).to_string()))
                    }
                    None => Ok(response(401, r#"{"message":"Token refresh failed"}"#)),
                };
            }

            self.state.data_calls.fetch_add(1, Ordering::SeqCst);

            let accepted = format!("Bearer {}", self.state.accepted.lock().unwrap());
            let authorized = request.header("Authorization") == Some(accepted.as_str());
            if self.state.always_reject || !authorized {
                self.state.rejections.fetch_add(1, Ordering::SeqCst);
                return Ok(response(401, r#"{"message":"Invalid or expired token"}"#));
            }
            Ok(response(200, r#"{"ok":true}"#))
        }
    }

    // ── Token attachment ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_token_attached_to_json_request() {
        let (transport, client) = scripted(vec![response(200, "[]")], Some("T"));

        let _: Option<Value> = client.get("/api/employees").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, format!("{}{}", BASE, "/api/employees"));
        assert_eq!(requests[0].header("Authorization"), Some("Bearer T"));
        assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_no_token_sends_no_auth_header() {
        let (transport, client) = scripted(vec![response(200, "[]")], None);

        let _: Option<Value> = client.get("/api/employees").await.unwrap();

        // No header at all -- not "Bearer null".
        assert_eq!(transport.requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_token_attached_to_bytes_and_multipart() {
        let (transport, client) = scripted(
            vec![response(200, "raw"), response(200, r#"{"ok":true}"#)],
            Some("T"),
        );

        let bytes = client
            .fetch_bytes("/api/documents/9/download")
            .await
            .unwrap();
        assert_eq!(bytes.unwrap(), b"raw".to_vec());

        let form = MultipartForm::new().text("description", "x");
        let _: Option<Value> = client.upload("/api/documents/upload", form).await.unwrap();

        for request in transport.requests() {
            assert_eq!(request.header("Authorization"), Some("Bearer T"));
        }
    }

    // ── Refresh-and-retry cycle ──────────────────────────────────────────

    #[tokio::test]
    async fn test_refresh_and_retry_on_401() {
        let backend = backend("NEW", Some("NEW"), false, 0);
        let store = Arc::new(MemoryStore::with_session(session("OLD")));
        let client = ApiClient::with_transport(backend.clone(), BASE, store.clone());

        let body: Option<Value> = client.get("/api/data").await.unwrap();
        assert_eq!(body.unwrap(), json!({ "ok": true }));

        assert_eq!(backend.refresh_calls(), 1);
        assert_eq!(backend.data_calls(), 2);
        assert_eq!(store.token().unwrap().unwrap(), "NEW");

        // The refresh call authenticated with the stale token.
        let requests = backend.requests();
        let refresh = requests
            .iter()
            .find(|r| r.url.ends_with("/api/auth/refresh"))
            .unwrap();
        assert_eq!(refresh.header("Authorization"), Some("Bearer OLD"));
        assert_eq!(refresh.method, Method::POST);

        // The retry carried the fresh token.
        assert_eq!(
            requests.last().unwrap().header("Authorization"),
            Some("Bearer NEW")
        );
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_refresh() {
        // Refresh completes only after both first attempts were rejected,
        // so both callers are inside the cycle at the same time.
        let backend = backend("NEW", Some("NEW"), false, 2);
        let store = Arc::new(MemoryStore::with_session(session("OLD")));
        let client = Arc::new(ApiClient::with_transport(backend.clone(), BASE, store.clone()));

        let a = tokio::spawn({
            let client = Arc::clone(&client);
            async move { client.get::<Value>("/api/a").await }
        });
        let b = tokio::spawn({
            let client = Arc::clone(&client);
            async move { client.get::<Value>("/api/b").await }
        });

        assert!(a.await.unwrap().is_ok());
        assert!(b.await.unwrap().is_ok());

        // One refresh total; both requests retried with the fresh token.
        assert_eq!(backend.refresh_calls(), 1);
        assert_eq!(backend.data_calls(), 4);
        assert_eq!(store.token().unwrap().unwrap(), "NEW");

        let retried_with_new = backend
            .requests()
            .iter()
            .filter(|r| {
                !r.url.ends_with("/api/auth/refresh")
                    && r.header("Authorization") == Some("Bearer NEW")
            })
            .count();
        assert_eq!(retried_with_new, 2);
    }

    #[tokio::test]
    async fn test_retry_happens_at_most_once() {
        // Refresh succeeds but the resource keeps rejecting (e.g. a revoked
        // account): the client must give up after exactly one retry.
        let backend = backend("NEW", Some("NEW"), true, 0);
        let store = Arc::new(MemoryStore::with_session(session("OLD")));
        let client = ApiClient::with_transport(backend.clone(), BASE, store.clone());
        let mut events = client.events().subscribe();

        let result = client.get::<Value>("/api/data").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));

        assert_eq!(backend.data_calls(), 2);
        assert_eq!(backend.refresh_calls(), 1);

        // Storage cleared, exactly one notification.
        assert!(store.load().unwrap().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::AuthenticationLost);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_refresh_failure_ends_session_once() {
        let backend = backend("irrelevant", None, false, 0);
        let store = Arc::new(MemoryStore::with_session(session("OLD")));
        let client = ApiClient::with_transport(backend.clone(), BASE, store.clone());
        let mut events = client.events().subscribe();

        let result = client.get::<Value>("/api/data").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));

        assert_eq!(backend.data_calls(), 1);
        assert_eq!(backend.refresh_calls(), 1);
        assert!(store.load().unwrap().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::AuthenticationLost);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_auth_failure_without_token_fails_fast() {
        let (transport, client) = scripted(
            vec![response(401, r#"{"message":"Invalid credentials"}"#)],
            None,
        );
        let mut events = client.events().subscribe();

        let result = client.get::<Value>("/api/employees").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));

        // No refresh attempt, no event: there was no session to lose.
        assert_eq!(transport.requests().len(), 1);
        assert!(events.try_recv().is_err());
    }

    // ── Error classification ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_api_error_message_extracted() {
        let (_, client) = scripted(
            vec![response(409, r#"{"message":"Card already exists"}"#)],
            Some("T"),
        );

        match client.get::<Value>("/api/cards").await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "Card already exists");
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_error_generic_fallback() {
        let (_, client) = scripted(vec![response(500, "<html>boom</html>")], Some("T"));

        match client.get::<Value>("/api/cards").await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, GENERIC_ERROR_MESSAGE);
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    // ── Empty-body normalization ─────────────────────────────────────────

    #[tokio::test]
    async fn test_empty_body_yields_none() {
        let (_, client) = scripted(
            vec![no_content(), empty_ok(), no_content(), no_content()],
            Some("T"),
        );

        // JSON: 204 and 200-with-zero-length both normalize to None.
        let on_204: Option<Value> = client.get("/api/x").await.unwrap();
        assert!(on_204.is_none());
        let on_empty_200: Option<Value> = client.get("/api/x").await.unwrap();
        assert!(on_empty_200.is_none());

        // Binary and multipart: 204 normalizes to None.
        assert!(client.fetch_bytes("/api/x").await.unwrap().is_none());
        let uploaded: Option<Value> = client.upload("/api/x", MultipartForm::new()).await.unwrap();
        assert!(uploaded.is_none());
    }

    // ── Header handling ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let (transport, client) = scripted(vec![response(200, "{}")], Some("T"));

        let _: Option<Value> = client
            .request(
                Method::POST,
                "/api/export",
                None,
                &[
                    ("Content-Type", "text/csv"),
                    ("Authorization", "Bearer OTHER"),
                ],
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        let content_types: Vec<&str> = request
            .headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(content_types, vec!["text/csv"]);
        assert_eq!(request.header("Authorization"), Some("Bearer OTHER"));
    }

    #[tokio::test]
    async fn test_multipart_sets_no_content_type() {
        let (transport, client) = scripted(vec![response(200, r#"{"id":1}"#)], Some("T"));

        let form = MultipartForm::new()
            .file("file", "doc.pdf", "application/pdf", vec![1, 2, 3])
            .text("employeeId", "7");
        let _: Option<Value> = client.upload("/api/documents/upload", form).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        // The boundary comes from the transport; the client must not set one.
        assert_eq!(request.header("Content-Type"), None);
        assert!(matches!(request.body, RequestBody::Multipart(_)));
    }
}

#[cfg(test)]
mod endpoint_tests {
    use serde_json::Value;

    use crate::api::transport::RequestBody;
    use crate::api::{access, auth, employees};

    use super::support::{response, scripted};

    #[tokio::test]
    async fn test_employee_list_decodes_rows() {
        let body = r#"[
            {"id":1,"companyId":2,"name":"Mario","surname":"Rossi","taxCode":"RSSMRA",
             "birthday":"1990-04-01","address":null,"city":"Milano",
             "email":"m.rossi@example.com","phone":null,"note":null,"deleted":false}
        ]"#;
        let (transport, client) = scripted(vec![response(200, body)], Some("T"));

        let rows = employees::list(&client).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Mario");
        assert_eq!(rows[0].surname, "Rossi");
        assert_eq!(transport.requests()[0].url, "http://api.test/api/employees");
    }

    #[tokio::test]
    async fn test_detailed_logs_encodes_filters() {
        let body = r#"{"content":[],"pageNumber":0,"pageSize":25,"totalElements":0,"totalPages":0}"#;
        let (transport, client) = scripted(vec![response(200, body)], Some("T"));

        let filter = access::LogFilter {
            search: Some("rossi mario".to_string()),
            kind: Some(access::AccessType::In),
            modified: Some(false),
            deleted: None,
        };
        let page = access::detailed_logs(
            &client,
            chrono::NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            0,
            25,
            &filter,
        )
        .await
        .unwrap();
        assert!(page.content.is_empty());
        assert!(!page.has_next());

        let url = transport.requests()[0].url.clone();
        assert!(url.contains("date=2026-08-05"));
        assert!(url.contains("page=0"));
        assert!(url.contains("search=rossi%20mario"));
        assert!(url.contains("type=IN"));
        assert!(url.contains("modified=false"));
        assert!(!url.contains("deleted="));
    }

    #[tokio::test]
    async fn test_login_persists_all_three_keys() {
        let body = r#"{
            "token":"tok",
            "user":{"id":5,"username":"admin","email":"admin@example.com","companyId":null},
            "roles":["ADMIN","HR"]
        }"#;
        let (transport, client) = scripted(vec![response(200, body)], None);

        let logged_in = auth::login(&client, "admin", "secret").await.unwrap();
        assert_eq!(logged_in.token, "tok");
        assert!(logged_in.has_role(&["ADMIN"]));
        assert!(!logged_in.has_role(&["SUPERVISOR"]));

        let stored = client.store().load().unwrap().unwrap();
        assert_eq!(stored, logged_in);

        // Login itself went out unauthenticated.
        assert_eq!(transport.requests()[0].header("Authorization"), None);
        let sent: Value = match &transport.requests()[0].body {
            RequestBody::Json(value) => value.clone(),
            other => panic!("expected JSON body, got {:?}", other),
        };
        assert_eq!(sent["username"], "admin");

        auth::logout(&client).unwrap();
        assert!(client.store().load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_document_builds_expected_form() {
        let body = r#"{
            "id":11,"employeeId":7,"fileName":"contract.pdf","mimeType":"application/pdf",
            "description":"signed copy","uploadedAt":"2026-08-05T09:30:00Z","deleted":false
        }"#;
        let (transport, client) = scripted(vec![response(200, body)], Some("T"));

        let document = employees::upload_document(
            &client,
            7,
            "contract.pdf",
            "application/pdf",
            vec![0xDE, 0xAD],
            "signed copy",
        )
        .await
        .unwrap();
        assert_eq!(document.id, 11);
        assert_eq!(document.file_name, "contract.pdf");

        let request = &transport.requests()[0];
        assert_eq!(request.url, "http://api.test/api/documents/upload");
        assert!(matches!(request.body, RequestBody::Multipart(_)));
    }
}

/// Helpers shared by the test modules above.
#[cfg(test)]
mod support {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crate::api::client::ApiClient;
    use crate::api::transport::{
        HttpRequest, HttpResponse, HttpTransport, StatusCode, TransportError,
    };
    use crate::session::{MemoryStore, Session, UserProfile};

    pub(super) const BASE: &str = "http://api.test";

    pub(super) fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            content_length: Some(body.len() as u64),
            body: body.as_bytes().to_vec(),
        }
    }

    pub(super) fn no_content() -> HttpResponse {
        HttpResponse {
            status: StatusCode::NO_CONTENT,
            content_length: Some(0),
            body: Vec::new(),
        }
    }

    pub(super) fn empty_ok() -> HttpResponse {
        HttpResponse {
            status: StatusCode::OK,
            content_length: Some(0),
            body: Vec::new(),
        }
    }

    pub(super) fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            roles: vec!["ADMIN".to_string()],
            user: UserProfile {
                id: 1,
                username: "admin".to_string(),
                email: "admin@example.com".to_string(),
                company_id: Some(1),
            },
        }
    }

    /// Hands out canned responses in order and records every request.
    #[derive(Clone)]
    pub(super) struct Scripted {
        responses: Arc<Mutex<VecDeque<HttpResponse>>>,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl Scripted {
        pub(super) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpTransport for Scripted {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Network("no scripted response left".to_string()))
        }
    }

    /// Scripted client, logged in with the given token when one is passed.
    pub(super) fn scripted(
        responses: Vec<HttpResponse>,
        token: Option<&str>,
    ) -> (Scripted, ApiClient<Scripted>) {
        let transport = Scripted {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let store: Arc<MemoryStore> = match token {
            Some(token) => Arc::new(MemoryStore::with_session(session(token))),
            None => Arc::new(MemoryStore::new()),
        };
        let client = ApiClient::with_transport(transport.clone(), BASE, store);
        (transport, client)
    }
}
