//! Access-log operations: badge swipe records, work status, anomalies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;
use super::types::{Count, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessType {
    In,
    Out,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub card_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AccessType,
    pub modified: bool,
    pub modified_at: Option<DateTime<Utc>>,
    pub deleted: bool,
}

/// Access log joined with employee and card details for the log table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAccessLog {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub employee_name: Option<String>,
    pub employee_surname: Option<String>,
    pub card_id: Option<i64>,
    pub card_uid: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AccessType,
    pub modified: bool,
    pub deleted: bool,
}

/// A day where an employee's swipe sequence does not add up.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessAnomaly {
    pub employee_id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: AnomalyType,
    pub description: Option<String>,
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    MissingExit,
    MissingEntry,
    OddNumberLogs,
}

/// Filters for the paginated detailed-log listing.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Free-text employee search; URL-encoded before sending.
    pub search: Option<String>,
    pub kind: Option<AccessType>,
    pub modified: Option<bool>,
    pub deleted: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualLogDraft {
    pub employee_id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AccessType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogUpdate {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AccessType,
}

/// GET /api/access-logs/count -- employees currently clocked in.
pub async fn at_work_count<T: HttpTransport>(client: &ApiClient<T>) -> Result<i64, ApiError> {
    let count: Count = client
        .get("/api/access-logs/count")
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(count.count)
}

/// GET /api/access-logs/detailed -- one page of a day's logs.
pub async fn detailed_logs<T: HttpTransport>(
    client: &ApiClient<T>,
    date: NaiveDate,
    page: u32,
    size: u32,
    filter: &LogFilter,
) -> Result<Page<DetailedAccessLog>, ApiError> {
    let mut path = format!(
        "/api/access-logs/detailed?date={}&page={}&size={}",
        date, page, size
    );
    if let Some(search) = &filter.search {
        path.push_str(&format!("&search={}", urlencoding::encode(search)));
    }
    if let Some(kind) = filter.kind {
        path.push_str(match kind {
            AccessType::In => "&type=IN",
            AccessType::Out => "&type=OUT",
        });
    }
    if let Some(modified) = filter.modified {
        path.push_str(&format!("&modified={}", modified));
    }
    if let Some(deleted) = filter.deleted {
        path.push_str(&format!("&deleted={}", deleted));
    }

    client.get(&path).await?.ok_or(ApiError::EmptyResponse)
}

/// GET /api/access-logs/detailed/all -- every log for one day.
pub async fn all_detailed_logs<T: HttpTransport>(
    client: &ApiClient<T>,
    date: NaiveDate,
) -> Result<Vec<DetailedAccessLog>, ApiError> {
    Ok(client
        .get(&format!("/api/access-logs/detailed/all?date={}", date))
        .await?
        .unwrap_or_default())
}

/// POST /api/access-logs -- insert a manual log entry.
pub async fn add_manual_log<T: HttpTransport>(
    client: &ApiClient<T>,
    log: &ManualLogDraft,
) -> Result<AccessLog, ApiError> {
    client
        .post("/api/access-logs", log)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// PUT /api/access-logs/{id}.
pub async fn update_log<T: HttpTransport>(
    client: &ApiClient<T>,
    id: i64,
    log: &LogUpdate,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> =
        client.put(&format!("/api/access-logs/{}", id), log).await?;
    Ok(())
}

/// DELETE /api/access-logs/{id}.
pub async fn delete_log<T: HttpTransport>(client: &ApiClient<T>, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/access-logs/{}", id)).await
}

/// GET /api/access-logs/employee/{id} -- an employee's logs in a range.
pub async fn employee_logs<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<AccessLog>, ApiError> {
    Ok(client
        .get(&format!(
            "/api/access-logs/employee/{}?start={}&end={}",
            employee_id,
            urlencoding::encode(&start.to_rfc3339()),
            urlencoding::encode(&end.to_rfc3339())
        ))
        .await?
        .unwrap_or_default())
}

/// GET /api/access-logs/status/{employeeId} -- currently at work?
pub async fn work_status<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<bool, ApiError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct WorkStatus {
        is_working: Option<bool>,
    }

    let status: WorkStatus = client
        .get(&format!("/api/access-logs/status/{}", employee_id))
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(status.is_working.unwrap_or(false))
}

/// GET /api/access-logs/anomalies -- anomalies for all employees in a range.
pub async fn anomalies<T: HttpTransport>(
    client: &ApiClient<T>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<AccessAnomaly>, ApiError> {
    Ok(client
        .get(&format!(
            "/api/access-logs/anomalies?startDate={}&endDate={}",
            start_date, end_date
        ))
        .await?
        .unwrap_or_default())
}

/// GET /api/access-logs/employee/{id}/has-anomalies.
pub async fn has_anomalies<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<bool, ApiError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct AnomalyCheck {
        has_anomalies: bool,
    }

    let check: AnomalyCheck = client
        .get(&format!(
            "/api/access-logs/employee/{}/has-anomalies?startDate={}&endDate={}",
            employee_id, start_date, end_date
        ))
        .await?
        .ok_or(ApiError::EmptyResponse)?;
    Ok(check.has_anomalies)
}

/// POST /api/access-logs/read -- simulate a badge read at the gate.
pub async fn read_card<T: HttpTransport>(
    client: &ApiClient<T>,
    card_uid: &str,
) -> Result<AccessLog, ApiError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct CardRequest<'a> {
        card_uid: &'a str,
    }

    client
        .post("/api/access-logs/read", &CardRequest { card_uid })
        .await?
        .ok_or(ApiError::EmptyResponse)
}
