//! Service ticket handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use core_kernel::ServiceTicketId;
use domain_crm::{NewServiceTicket, ServiceTicket, ServiceTicketUpdate, TicketStatus};

use super::parse_id;
use crate::dto::common::StatusQuery;
use crate::{error::ApiError, AppState};

/// Opens a service ticket
pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<NewServiceTicket>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceTicket>), ApiError> {
    let Json(request) = payload?;
    let ticket = state.tickets().create(request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Lists tickets with their customer summary
pub async fn list_tickets(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Vec<ServiceTicket>>, ApiError> {
    let Query(query) = query?;
    let status = query.parse::<TicketStatus>()?;
    Ok(Json(state.tickets().list(status).await?))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceTicket>, ApiError> {
    let id: ServiceTicketId = parse_id(&id, "service ticket")?;
    Ok(Json(state.tickets().get_by_id(id).await?))
}

/// Assigns, schedules or moves a ticket through its lifecycle
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ServiceTicketUpdate>, JsonRejection>,
) -> Result<Json<ServiceTicket>, ApiError> {
    let id: ServiceTicketId = parse_id(&id, "service ticket")?;
    let Json(update) = payload?;
    Ok(Json(state.tickets().update(id, update).await?))
}
