//! Shared request and response types for the StaffDesk backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! Domain-specific types live next to their endpoint module; this file
//! holds the auth wire types and the shapes used across modules.

use serde::{Deserialize, Serialize};

use crate::session::UserProfile;

/// Login request body sent to POST /api/auth/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response from POST /api/auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
    pub roles: Vec<String>,
}

/// Refresh response from POST /api/auth/refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Validation response from GET /api/auth/validate.
#[derive(Debug, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub username: String,
}

/// Error body shape the API returns on failures. The message is optional;
/// the client falls back to a generic string when it is missing.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// Count payload used by the dashboard endpoints.
#[derive(Debug, Deserialize)]
pub struct Count {
    pub count: i64,
}

/// Server-side page of results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total_elements: i64,
    pub total_pages: i32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages - 1
    }
}
