//! Per-employee monthly statistics.

use serde::Deserialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;

/// Monthly working-hours statistics for one employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub hours_worked: i32,
    pub absences_count: i32,
    /// Percentage of scheduled days actually worked, rounded to 2 decimals.
    pub attendance_rate: f64,
}

/// GET /api/stats/employee/{id}/monthly.
///
/// `year_month` uses the `YYYY-MM` form, e.g. "2026-08".
pub async fn employee_monthly<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
    year_month: &str,
) -> Result<MonthlyStats, ApiError> {
    client
        .get(&format!(
            "/api/stats/employee/{}/monthly?yearMonth={}",
            employee_id, year_month
        ))
        .await?
        .ok_or(ApiError::EmptyResponse)
}
