//! Session lifecycle operations: login, logout, token validation.
//!
//! Login persists the token, role list, and user profile to the client's
//! session store in one write; logout clears them in one delete. A logout
//! is deliberate, so no auth-lost event fires.

use crate::session::Session;

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;
use super::types::{LoginRequest, LoginResponse, ValidationResponse};

/// Authenticate with username and password and persist the session.
///
/// POST /api/auth/login. The login endpoint is intentionally reached
/// without a credential; a stale stored token, if any, is replaced by the
/// fresh session on success.
pub async fn login<T: HttpTransport>(
    client: &ApiClient<T>,
    username: &str,
    password: &str,
) -> Result<Session, ApiError> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = client
        .post("/api/auth/login", &request)
        .await?
        .ok_or(ApiError::EmptyResponse)?;

    let session = Session {
        token: response.token,
        roles: response.roles,
        user: response.user,
    };
    client.store().save(&session)?;

    log::info!("logged in as {}", session.user.username);
    Ok(session)
}

/// Drop the persisted session. Safe to call when already logged out.
pub fn logout<T: HttpTransport>(client: &ApiClient<T>) -> Result<(), ApiError> {
    if client.store().clear()? {
        log::info!("logged out");
    }
    Ok(())
}

/// Ask the server whether the stored token is still accepted.
///
/// GET /api/auth/validate.
pub async fn validate<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<ValidationResponse, ApiError> {
    client
        .get("/api/auth/validate")
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// The locally persisted session, if one exists.
pub fn current_session<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<Option<Session>, ApiError> {
    Ok(client.store().load()?)
}
