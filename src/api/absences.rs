//! Absence and leave-balance operations, plus company holidays.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;
use super::types::Count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceType {
    Vacation,
    Rol,
    SickLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    pub id: i64,
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub kind: AbsenceType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours_count: i32,
    pub status: AbsenceStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

/// Absence row joined with the employee's display name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAbsence {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub kind: AbsenceType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours_count: Option<i32>,
    pub status: AbsenceStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceDraft {
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub kind: AbsenceType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours_count: i32,
    pub note: Option<String>,
}

/// Remaining vacation/ROL hours for an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub id: i64,
    pub employee_id: i64,
    pub vacation_available: f64,
    pub rol_available: f64,
}

/// Balance broken down into available, used, and still-to-mature hours.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedBalance {
    pub employee_id: i64,
    pub vacation_available: f64,
    pub rol_available: f64,
    pub vacation_used: f64,
    pub rol_used: f64,
    pub vacation_to_mature: f64,
    pub rol_to_mature: f64,
}

/// Monthly accrual rates for an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveAccrual {
    pub id: i64,
    pub employee_id: i64,
    pub vacation_hours_per_month: f64,
    pub rol_hours_per_month: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInit {
    pub employee_id: i64,
    pub vacation_available: f64,
    pub rol_available: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Holiday {
    pub id: i64,
    pub name: String,
    pub recurring: bool,
    pub day: i16,
    pub month: i16,
    pub year: i16,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HolidayDraft {
    pub name: String,
    pub recurring: bool,
    pub day: i16,
    pub month: i16,
    pub year: i16,
}

// ── Absences ─────────────────────────────────────────────────────────────

/// GET /api/absences/today -- approved absences for today.
pub async fn today_approved_count<T: HttpTransport>(client: &ApiClient<T>) -> Result<i64, ApiError> {
    let count: Count = client
        .get("/api/absences/today")
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(count.count)
}

/// GET /api/absences/future -- upcoming absences still to approve.
pub async fn future_to_approve_count<T: HttpTransport>(
    client: &ApiClient<T>,
) -> Result<i64, ApiError> {
    let count: Count = client
        .get("/api/absences/future")
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(count.count)
}

/// POST /api/absences -- record an approved absence.
pub async fn create<T: HttpTransport>(
    client: &ApiClient<T>,
    absence: &AbsenceDraft,
) -> Result<Absence, ApiError> {
    client
        .post("/api/absences", absence)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// DELETE /api/absences/{id}.
pub async fn delete<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/absences/{}", id)).await
}

/// GET /api/absences/detailed -- absences in a date range, optionally for a
/// single employee.
pub async fn detailed_in_range<T: HttpTransport>(
    client: &ApiClient<T>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    employee_id: Option<i64>,
) -> Result<Vec<DetailedAbsence>, ApiError> {
    let mut path = format!(
        "/api/absences/detailed?startDate={}&endDate={}",
        start_date, end_date
    );
    if let Some(id) = employee_id {
        path.push_str(&format!("&employeeId={}", id));
    }
    Ok(client.get(&path).await?.unwrap_or_default())
}

/// GET /api/absences/needed -- leave hours needed to cover a range.
pub async fn needed_hours<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<f64, ApiError> {
    #[derive(Deserialize)]
    struct HoursNeeded {
        needed: f64,
    }

    let needed: HoursNeeded = client
        .get(&format!(
            "/api/absences/needed?startDate={}&endDate={}&employeeId={}",
            start_date, end_date, employee_id
        ))
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(needed.needed)
}

// ── Balances and accrual ─────────────────────────────────────────────────

/// GET /api/absences/{employeeId}/detailed-balance.
pub async fn detailed_balance<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<DetailedBalance, ApiError> {
    client
        .get(&format!("/api/absences/{}/detailed-balance", employee_id))
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// POST /api/absences/init -- set the starting balance for an employee.
pub async fn init_balance<T: HttpTransport>(
    client: &ApiClient<T>,
    balance: &BalanceInit,
) -> Result<LeaveBalance, ApiError> {
    client
        .post("/api/absences/init", balance)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/absences/{balanceId}/balance.
pub async fn update_balance<T: HttpTransport>(
    client: &ApiClient<T>,
    balance: &LeaveBalance,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .put(&format!("/api/absences/{}/balance", balance.id), balance)
        .await?;
    Ok(())
}

/// GET /api/absences/{employeeId}/accrual.
pub async fn accrual<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<LeaveAccrual, ApiError> {
    client
        .get(&format!("/api/absences/{}/accrual", employee_id))
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/absences/{id}/accrual.
pub async fn update_accrual<T: HttpTransport>(
    client: &ApiClient<T>,
    accrual: &LeaveAccrual,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .put(&format!("/api/absences/{}/accrual", accrual.id), accrual)
        .await?;
    Ok(())
}

// ── Holidays ─────────────────────────────────────────────────────────────

/// POST /api/holidays.
pub async fn add_holiday<T: HttpTransport>(
    client: &ApiClient<T>,
    holiday: &HolidayDraft,
) -> Result<Holiday, ApiError> {
    client
        .post("/api/holidays", holiday)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// GET /api/holidays -- holidays overlapping a date range.
pub async fn holidays_in_range<T: HttpTransport>(
    client: &ApiClient<T>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<Holiday>, ApiError> {
    Ok(client
        .get(&format!(
            "/api/holidays?startDate={}&endDate={}",
            start_date, end_date
        ))
        .await?
        .unwrap_or_default())
}

/// DELETE /api/holidays/{id}.
pub async fn delete_holiday<T: HttpTransport>(
    client: &ApiClient<T>,
    holiday_id: i64,
) -> Result<(), ApiError> {
    client.delete(&format!("/api/holidays/{}", holiday_id)).await
}
