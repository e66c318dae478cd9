//! Employment contract operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::HttpTransport;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    /// `None` for an open-ended contract.
    pub end_date: Option<NaiveDate>,
    pub monthly_working_hours: i32,
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDraft {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_working_hours: i32,
}

/// POST /api/contracts -- register a new contract; any previous valid one
/// is superseded server-side.
pub async fn create<T: HttpTransport>(
    client: &ApiClient<T>,
    contract: &ContractDraft,
) -> Result<Contract, ApiError> {
    client
        .post("/api/contracts", contract)
        .await?
        .ok_or(ApiError::EmptyResponse)
}

/// GET /api/contracts/employee/{id} -- the currently valid contract.
pub async fn current<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Option<Contract>, ApiError> {
    client
        .get(&format!("/api/contracts/employee/{}", employee_id))
        .await
}

/// GET /api/contracts/employee/{id}/all -- full contract history.
pub async fn history<T: HttpTransport>(
    client: &ApiClient<T>,
    employee_id: i64,
) -> Result<Vec<Contract>, ApiError> {
    Ok(client
        .get(&format!("/api/contracts/employee/{}/all", employee_id))
        .await?
        .unwrap_or_default())
}

/// PUT /api/contracts/{id}.
pub async fn modify<T: HttpTransport>(
    client: &ApiClient<T>,
    contract_id: i64,
    contract: &ContractDraft,
) -> Result<(), ApiError> {
    let _: Option<serde_json::Value> = client
        .put(&format!("/api/contracts/{}", contract_id), contract)
        .await?;
    Ok(())
}

/// DELETE /api/contracts/{id} -- mark the contract invalid.
pub async fn invalidate<T: HttpTransport>(
    client: &ApiClient<T>,
    contract_id: i64,
) -> Result<(), ApiError> {
    client.delete(&format!("/api/contracts/{}", contract_id)).await
}
