//! Call log handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::CallLogId;
use domain_crm::{CallLog, NewCallLog};

use super::parse_id;
use crate::{error::ApiError, AppState};

/// Records a finished call
pub async fn create_call_log(
    State(state): State<AppState>,
    payload: Result<Json<NewCallLog>, JsonRejection>,
) -> Result<(StatusCode, Json<CallLog>), ApiError> {
    let Json(request) = payload?;
    let log = state.call_logs().create(request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn list_call_logs(State(state): State<AppState>) -> Result<Json<Vec<CallLog>>, ApiError> {
    Ok(Json(state.call_logs().list().await?))
}

pub async fn get_call_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CallLog>, ApiError> {
    let id: CallLogId = parse_id(&id, "call log")?;
    Ok(Json(state.call_logs().get_by_id(id).await?))
}
