//! Lead handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use core_kernel::LeadId;
use domain_crm::{Lead, LeadStatus, LeadUpdate, NewLead};

use super::parse_id;
use crate::dto::common::{StatusChange, StatusQuery};
use crate::{error::ApiError, AppState};

/// Creates a lead from intake
pub async fn create_lead(
    State(state): State<AppState>,
    payload: Result<Json<NewLead>, JsonRejection>,
) -> Result<(StatusCode, Json<Lead>), ApiError> {
    let Json(request) = payload?;
    let lead = state.leads().create(request).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

/// Lists leads, newest first
pub async fn list_leads(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let Query(query) = query?;
    let status = query.parse::<LeadStatus>()?;
    Ok(Json(state.leads().list(status).await?))
}

/// Gets a lead by ID
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, ApiError> {
    let id: LeadId = parse_id(&id, "lead")?;
    Ok(Json(state.leads().get_by_id(id).await?))
}

/// Updates the supplied lead fields
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LeadUpdate>, JsonRejection>,
) -> Result<Json<Lead>, ApiError> {
    let id: LeadId = parse_id(&id, "lead")?;
    let Json(update) = payload?;
    Ok(Json(state.leads().update(id, update).await?))
}

/// Moves a lead to a new status
pub async fn update_lead_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange<LeadStatus>>, JsonRejection>,
) -> Result<Json<Lead>, ApiError> {
    let id: LeadId = parse_id(&id, "lead")?;
    let Json(change) = payload?;
    Ok(Json(state.leads().update_status(id, change.status).await?))
}
