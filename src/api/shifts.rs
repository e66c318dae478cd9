//! Shift templates, weekly associations, and generated assignments.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDraft {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Weekly link between an employee and a shift template.
/// `day_of_week` is 1 (Monday) through 7 (Sunday); `None` means every day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssociation {
    pub id: i64,
    pub employee_id: i64,
    pub shift_id: i64,
    pub day_of_week: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationDraft {
    pub employee_id: i64,
    pub shift_id: i64,
    pub day_of_week: Option<i32>,
}

/// A shift instance scheduled for a concrete date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    pub id: i64,
    pub employee_id: i64,
    pub shift_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignmentDraft {
    pub employee_id: i64,
    pub shift_id: i64,
    pub date: NaiveDate,
}

/// GET /api/shifts.
pub async fn list<T: HttpTransport>(client: &ApiClient<T>) -> Result<Vec<Shift>, ApiError> {
    Ok(client.get("/api/shifts").await?.unwrap_or_default())
}

/// POST /api/shifts.
pub async fn create<T: HttpTransport>(
    client: &ApiClient<T>,
    shift: &ShiftDraft,
) -> Result<Shift, ApiError> {
    client
        .post("/api/shifts", shift)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// GET /api/shifts/associations/employee/{id}.
pub async fn employee_associations<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Vec<ShiftAssociation>, ApiError> {
    Ok(client
        .get(&format!("/api/shifts/associations/employee/{}", employee_id))
        .await?
        .unwrap_or_default())
}

/// POST /api/shifts/associations.
pub async fn create_association<T: HttpTransport>(
    client: &ApiClient<T>,
    association: &AssociationDraft,
) -> Result<ShiftAssociation, ApiError> {
    client
        .post("/api/shifts/associations", association)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// DELETE /api/shifts/associations/{id}.
pub async fn delete_association<T: HttpTransport>(
    client: &ApiClient<T>,
    association_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/shifts/associations/{}", association_id))
        .await
}

/// GET /api/shifts/assignments/employee/{id} -- assignments in a range.
pub async fn employee_assignments<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<ShiftAssignment>, ApiError> {
    Ok(client
        .get(&format!(
            "/api/shifts/assignments/employee/{}?startDate={}&endDate={}",
            employee_id, start_date, end_date
        ))
        .await?
        .unwrap_or_default())
}

/// POST /api/shifts/assignments/manual -- place one employee on one date.
pub async fn assign_manual<T: HttpTransport>(
    client: &ApiClient<T>,
    assignment: &ManualAssignmentDraft,
) -> Result<ShiftAssignment, ApiError> {
    client
        .post("/api/shifts/assignments/manual", assignment)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/shifts/assignments/{id}.
pub async fn modify_assignment<T: HttpTransport>(
    client: &ApiClient<T>,
    assignment: &ShiftAssignment,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .put(
            &format!("/api/shifts/assignments/{}", assignment.id),
            assignment,
        )
        .await?;
    Ok(())
}

/// DELETE /api/shifts/assignments/{id}.
pub async fn delete_assignment<T: HttpTransport>(
    client: &ApiClient<T>,
    assignment_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/api/shifts/assignments/{}", assignment_id))
        .await
}

/// POST /api/shifts/assignments/generate -- expand the weekly associations
/// into concrete assignments over a date range. Server-side job; returns
/// the assignments it created.
pub async fn generate_assignments<T: HttpTransport>(
    client: &ApiClient<T>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<ShiftAssignment>, ApiError> {
    Ok(client
        .post_empty(&format!(
            "/api/shifts/assignments/generate?startDate={}&endDate={}",
            start_date, end_date
        ))
        .await?
        .unwrap_or_default())
}
