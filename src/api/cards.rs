//! Badge and card-assignment operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::employees::Employee;
use super::error::ApiError;
use super::transport::HttpTransport;
use super::types::Count;

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: i64,
    pub uid: String,
    pub deleted: bool,
}

/// Card joined with its current assignment and holder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithDetails {
    pub id: i64,
    pub card_uid: String,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub employee_surname: Option<String>,
    pub assignment_id: Option<i64>,
    pub assignment_start_date: Option<NaiveDate>,
    pub assignment_end_date: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAssignment {
    pub id: i64,
    pub employee_id: i64,
    pub card_id: i64,
    pub start_date: NaiveDate,
    /// `None` while the assignment is active.
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    pub employee_id: i64,
    pub card_id: i64,
    pub start_date: NaiveDate,
}

/// One row of a card's assignment history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentHistoryRecord {
    pub id: i64,
    pub employee_name: String,
    pub employee_surname: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

// ── Cards ────────────────────────────────────────────────────────────────

/// POST /api/cards.
pub async fn create<T: HttpTransport>(client: &ApiClient<T>, uid: &str) -> Result<Card, ApiError> {
    #[derive(Serialize)]
    struct CardDraft<'a> {
        uid: &'a str,
    }

    client
        .post("/api/cards", &CardDraft { uid })
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// POST /api/cards/restore/{id} -- undelete a card.
pub async fn restore<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .post_empty(&format!("/api/cards/restore/{}", id))
        .await?;
    Ok(())
}

/// DELETE /api/cards/{id} -- soft delete.
pub async fn delete<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/cards/{}", id)).await
}

/// GET /api/cards.
pub async fn list<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Card>, ApiError> {
    Ok(client.get("/api/cards").await?.unwrap_or_default())
}

/// GET /api/cards/deleted.
pub async fn deleted<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Card>, ApiError> {
    Ok(client.get("/api/cards/deleted").await?.unwrap_or_default())
}

/// GET /api/cards/unassigned -- cards with no active assignment.
pub async fn unassigned<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Card>, ApiError> {
    Ok(client
        .get("/api/cards/unassigned")
        .await?
        .unwrap_or_default())
}

/// GET /api/cards/{id}.
pub async fn get<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<Card, ApiError> {
    client
        .get(&format!("/api/cards/{}", id))
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// GET /api/cards/count -- cards not deleted.
pub async fn count<T: HttpTransport>(client: &ApiClient<T>) -> Result<i64, ApiError> {
    let count: Count = client
        .get("/api/cards/count")
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(count.count)
}

/// GET /api/cards/detailed -- assigned cards with holder details.
pub async fn detailed<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<Vec<CardWithDetails>, ApiError> {
    Ok(client.get("/api/cards/detailed").await?.unwrap_or_default())
}

// ── Assignments ──────────────────────────────────────────────────────────

/// POST /api/assignments -- hand a card to an employee.
pub async fn assign<T: HttpTransport>(
    client: &ApiClient<T>,
    assignment: &AssignmentDraft,
) -> Result<CardAssignment, ApiError> {
    client
        .post("/api/assignments", assignment)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// DELETE /api/assignments/{id} -- close an assignment.
pub async fn revoke<T: HttpTransport>(
    client: &ApiClient<T>,
    assignment_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/assignments/{}", assignment_id))
        .await
}

/// GET /api/assignments/count.
pub async fn assigned_count<T: HttpTransport>(client: &ApiClient<T>) -> Result<i64, ApiError> {
    let count: Count = client
        .get("/api/assignments/count")
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(count.count)
}

/// GET /api/assignments/employee/{id}.
pub async fn employee_assignments<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Vec<CardAssignment>, ApiError> {
    Ok(client
        .get(&format!("/api/assignments/employee/{}", employee_id))
        .await?
        .unwrap_or_default())
}

/// GET /api/assignments/card/{id}/history.
pub async fn card_history<T: HttpTransport>(
    client: &ApiClient<T>,
    card_id: i64,
) -> Result<Vec<AssignmentHistoryRecord>, ApiError> {
    Ok(client
        .get(&format!("/api/assignments/card/{}/history", card_id))
        .await?
        .unwrap_or_default())
}

/// GET /api/assignments/card/{id}/employee -- current holder, if any.
pub async fn assigned_employee<T: HttpTransport>(
    client: &ApiClient<T>,
    card_id: i64,
) -> Result<Option<Employee>, ApiError> {
    client
        .get(&format!("/api/assignments/card/{}/employee", card_id))
        .await
}

/// GET /api/assignments/card/{id} -- current assignment, if any.
pub async fn card_assignment<T: HttpTransport>(
    client: &ApiClient<T>,
    card_id: i64,
) -> Result<Option<CardAssignment>, ApiError> {
    client
        .get(&format!("/api/assignments/card/{}", card_id))
        .await
}
