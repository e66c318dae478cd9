//! Administration operations: companies, user accounts, roles.

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;

#[derive(Debug, Clone, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyDraft {
    pub name: String,
}

/// A console user account (distinct from an employee record).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub company_id: Option<i64>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub username: String,
    pub password: String,
    pub email: String,
    pub company_id: Option<i64>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub username: String,
    pub email: String,
    pub company_id: Option<i64>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

// ── Companies ────────────────────────────────────────────────────────────

/// GET /api/companies?activeOnly=true.
pub async fn active_companies<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<Vec<Company>, ApiError> {
    Ok(client
        .get("/api/companies?activeOnly=true")
        .await?
        .unwrap_or_default())
}

/// POST /api/companies.
pub async fn add_company<T: HttpTransport>(
    client: &ApiClient<T>,
    company: &CompanyDraft,
) -> Result<Company, ApiError> {
    client
        .post("/api/companies", company)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/companies/{id}.
pub async fn update_company<T: HttpTransport>(
    client: &ApiClient<T>,
    company_id: i64,
    company: &CompanyDraft,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .put(&format!("/api/companies/{}", company_id), company)
        .await?;
    Ok(())
}

/// DELETE /api/companies/{id}.
pub async fn delete_company<T: HttpTransport>(
    client: &ApiClient<T>,
    company_id: i64,
) -> Result<(), ApiError> {
    client.delete(&format!("/api/companies/{}", company_id)).await
}

// ── Users ────────────────────────────────────────────────────────────────

/// GET /api/users.
pub async fn users<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Account>, ApiError> {
    Ok(client.get("/api/users").await?.unwrap_or_default())
}

/// POST /api/users.
pub async fn add_user<T: HttpTransport>(
    client: &ApiClient<T>,
    account: &AccountDraft,
) -> Result<Account, ApiError> {
    client
        .post("/api/users", account)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/users/{id}.
pub async fn update_user<T: HttpTransport>(
    client: &ApiClient<T>,
    user_id: i64,
    account: &AccountUpdate,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> =
        client.put(&format!("/api/users/{}", user_id), account).await?;
    Ok(())
}

/// DELETE /api/users/{id}.
pub async fn delete_user<T: HttpTransport>(
    client: &ApiClient<T>,
    user_id: i64,
) -> Result<(), ApiError> {
    client.delete(&format!("/api/users/{}", user_id)).await
}

// ── Roles ────────────────────────────────────────────────────────────────

/// GET /api/roles.
pub async fn roles<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Role>, ApiError> {
    Ok(client.get("/api/roles").await?.unwrap_or_default())
}

/// GET /api/roles/user/{id} -- roles granted to one account.
pub async fn user_roles<T: HttpTransport>(
    client: &ApiClient<T>,
    user_id: i64,
) -> Result<Vec<Role>, ApiError> {
    Ok(client
        .get(&format!("/api/roles/user/{}", user_id))
        .await?
        .unwrap_or_default())
}

/// POST /api/users/{userId}/roles/{roleId}.
pub async fn assign_role<T: HttpTransport>(
    client: &ApiClient<T>,
    user_id: i64,
    role_id: i64,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .post_empty(&format!("/api/users/{}/roles/{}", user_id, role_id))
        .await?;
    Ok(())
}

/// DELETE /api/users/{userId}/roles/{roleId}.
pub async fn revoke_role<T: HttpTransport>(
    client: &ApiClient<T>,
    user_id: i64,
    role_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/users/{}/roles/{}", user_id, role_id))
        .await
}
