//! Chat transcript handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use domain_crm::{ChatConversation, SaveConversation};

use crate::{error::ApiError, AppState};

/// Creates or replaces the transcript for a session
pub async fn save_conversation(
    State(state): State<AppState>,
    payload: Result<Json<SaveConversation>, JsonRejection>,
) -> Result<Json<ChatConversation>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.conversations().save(request).await?))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatConversation>, ApiError> {
    Ok(Json(state.conversations().get_by_session(&session_id).await?))
}
