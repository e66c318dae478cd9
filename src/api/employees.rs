//! Employee registry operations: CRUD, groups, documents, deadlines.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::{HttpTransport, MultipartForm};
use super::types::Count;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub company_id: Option<i64>,
    pub name: String,
    pub surname: String,
    pub tax_code: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub deleted: bool,
}

/// Fields accepted when creating or updating an employee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub company_id: Option<i64>,
    pub name: String,
    pub surname: String,
    pub tax_code: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDocument {
    pub id: i64,
    pub employee_id: i64,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDeadline {
    pub id: i64,
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub expiration_date: NaiveDate,
    pub note: Option<String>,
    pub reminder_days: Option<i32>,
    pub recipient_email: Option<String>,
    pub notified: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineDraft {
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub expiration_date: NaiveDate,
    pub note: Option<String>,
    pub reminder_days: Option<i32>,
    pub recipient_email: Option<String>,
}

// ── Employees ────────────────────────────────────────────────────────────

/// GET /api/employees/count -- number of active employees.
pub async fn count<T: HttpTransport>(client: &ApiClient<T>) -> Result<i64, ApiError> {
    let count: Count = client
        .get("/api/employees/count")
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(count.count)
}

/// GET /api/employees.
pub async fn list<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Employee>, ApiError> {
    Ok(client.get("/api/employees").await?.unwrap_or_default())
}

/// GET /api/employees/{id}.
pub async fn get<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<Employee, ApiError> {
    client
        .get(&format!("/api/employees/{}", id))
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// GET /api/employees/without-card -- employees with no active badge.
pub async fn without_card<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<Vec<Employee>, ApiError> {
    Ok(client
        .get("/api/employees/without-card")
        .await?
        .unwrap_or_default())
}

/// POST /api/employees.
pub async fn create<T: HttpTransport>(
    client: &ApiClient<T>,
    employee: &EmployeeDraft,
) -> Result<Employee, ApiError> {
    client
        .post("/api/employees", employee)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/employees/{id}.
pub async fn update<T: HttpTransport>(
    client: &ApiClient<T>,
    id: i64,
    employee: &EmployeeDraft,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .put(&format!("/api/employees/{}", id), employee)
        .await?;
    Ok(())
}

/// DELETE /api/employees/{id} -- soft delete.
pub async fn delete<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/employees/{}", id)).await
}

// ── Groups ───────────────────────────────────────────────────────────────

/// GET /api/groups.
pub async fn groups<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<Vec<EmployeeGroup>, ApiError> {
    Ok(client.get("/api/groups").await?.unwrap_or_default())
}

/// GET /api/employees/{id}/groups -- groups the employee belongs to.
pub async fn groups_of<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Vec<EmployeeGroup>, ApiError> {
    Ok(client
        .get(&format!("/api/employees/{}/groups", employee_id))
        .await?
        .unwrap_or_default())
}

/// POST /api/groups.
pub async fn create_group<T: HttpTransport>(
    client: &ApiClient<T>,
    name: &str,
) -> Result<EmployeeGroup, ApiError> {
    #[derive(Serialize)]
    struct GroupDraft<'a> {
        name: &'a str,
    }

    client
        .post("/api/groups", &GroupDraft { name })
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// POST /api/groups/{groupId}/members/{employeeId}.
pub async fn add_group_member<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    group_id: i64,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .post_empty(&format!("/api/groups/{}/members/{}", group_id, employee_id))
        .await?;
    Ok(())
}

/// DELETE /api/groups/{groupId}/members/{employeeId}.
pub async fn remove_group_member<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    group_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/groups/{}/members/{}", group_id, employee_id))
        .await
}

// ── Documents ────────────────────────────────────────────────────────────

/// GET /api/documents/employee/{id}.
pub async fn documents_of<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Vec<EmployeeDocument>, ApiError> {
    Ok(client
        .get(&format!("/api/documents/employee/{}", employee_id))
        .await?
        .unwrap_or_default())
}

/// GET /api/documents/{id}/download -- raw file bytes.
pub async fn download_document<T: HttpTransport>(
    client: &ApiClient<T>,
    document_id: i64,
) -> Result<Vec<u8>, ApiError> {
    client
        .fetch_bytes(&format!("/api/documents/{}/download", document_id))
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// POST /api/documents/upload with multipart form data.
///
/// Form fields match what the server expects: `file`, `description`, and
/// `employeeId`.
pub async fn upload_document<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    file_name: &str,
    mime: &str,
    data: Vec<u8>,
    description: &str,
) -> Result<EmployeeDocument, ApiError> {
    let form = MultipartForm::new()
        .file("file", file_name, mime, data)
        .text("description", description)
        .text("employeeId", &employee_id.to_string());

    client
        .upload("/api/documents/upload", form)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// DELETE /api/documents/{id}.
pub async fn delete_document<T: HttpTransport>(
    client: &ApiClient<T>,
    document_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/documents/{}", document_id))
        .await
}

// ── Deadlines ────────────────────────────────────────────────────────────

/// GET /api/deadlines/employee/{id}.
pub async fn deadlines_of<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Vec<EmployeeDeadline>, ApiError> {
    Ok(client
        .get(&format!("/api/deadlines/employee/{}", employee_id))
        .await?
        .unwrap_or_default())
}

/// POST /api/deadlines.
pub async fn add_deadline<T: HttpTransport>(
    client: &ApiClient<T>,
    deadline: &DeadlineDraft,
) -> Result<EmployeeDeadline, ApiError> {
    client
        .post("/api/deadlines", deadline)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// DELETE /api/deadlines/{id}.
pub async fn delete_deadline<T: HttpTransport>(
    client: &ApiClient<T>,
    deadline_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/deadlines/{}", deadline_id))
        .await
}
