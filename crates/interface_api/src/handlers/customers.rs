//! Customer handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use core_kernel::CustomerId;
use domain_crm::{Customer, CustomerStatus, CustomerUpdate, NewCustomer};

use super::parse_id;
use crate::dto::common::StatusQuery;
use crate::{error::ApiError, AppState};

pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(request) = payload?;
    let customer = state.customers().create(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Lists customers alphabetically
pub async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let Query(query) = query?;
    let status = query.parse::<CustomerStatus>()?;
    Ok(Json(state.customers().list(status).await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id: CustomerId = parse_id(&id, "customer")?;
    Ok(Json(state.customers().get_by_id(id).await?))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerUpdate>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let id: CustomerId = parse_id(&id, "customer")?;
    let Json(update) = payload?;
    Ok(Json(state.customers().update(id, update).await?))
}
