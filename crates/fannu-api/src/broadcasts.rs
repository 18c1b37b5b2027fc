use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use fannu_db::models::BroadcastRow;
use fannu_types::api::{Claims, CreateBroadcastRequest};
use fannu_types::models::BroadcastStatus;

use crate::auth::AppState;
use crate::creators::require_creator;
use crate::error::ApiError;
use crate::validation;

fn require_own_broadcast(
    state: &AppState,
    claims: &Claims,
    broadcast_id: Uuid,
) -> Result<BroadcastRow, ApiError> {
    let creator = require_creator(state, claims)?;
    let row = state
        .db
        .get_broadcast(&broadcast_id.to_string())?
        .ok_or(ApiError::not_found("broadcast"))?;
    if row.creator_id != creator.id {
        return Err(ApiError::not_found("broadcast"));
    }
    Ok(row)
}

/// GET /me/broadcasts — newest first.
pub async fn list_my_broadcasts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;
    let rows = state.db.list_broadcasts(&creator.id)?;
    let broadcasts = rows
        .into_iter()
        .map(|r| r.into_domain())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(broadcasts))
}

/// POST /me/broadcasts — created SCHEDULED when `scheduled_at` is present,
/// DRAFT otherwise. Delivery of SENT broadcasts happens outside this service.
pub async fn create_broadcast(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateBroadcastRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;

    let mut errors = vec![];
    let segment = validation::validate_broadcast_segment(&req.segment, &mut errors);
    validation::validate_broadcast_body(&req.body, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let segment = segment.ok_or_else(|| anyhow::anyhow!("segment parsed but missing"))?;

    let status = if req.scheduled_at.is_some() {
        BroadcastStatus::Scheduled
    } else {
        BroadcastStatus::Draft
    };

    let id = Uuid::new_v4().to_string();
    state.db.insert_broadcast(
        &id,
        &creator.id,
        segment.as_str(),
        &req.body,
        req.scheduled_at.map(|t| t.to_rfc3339()).as_deref(),
        status.as_str(),
    )?;

    let row = state
        .db
        .get_broadcast(&id)?
        .ok_or_else(|| anyhow::anyhow!("broadcast vanished after insert"))?;

    Ok((StatusCode::CREATED, Json(row.into_domain()?)))
}

/// POST /me/broadcasts/{id}/cancel — only SCHEDULED broadcasts can be
/// cancelled; the guard is enforced at update time, not at read time.
pub async fn cancel_broadcast(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(broadcast_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_own_broadcast(&state, &claims, broadcast_id)?;

    let id = broadcast_id.to_string();
    if !state.db.cancel_broadcast(&id)? {
        return Err(ApiError::Conflict("broadcast is not scheduled".into()));
    }

    let row = state
        .db
        .get_broadcast(&id)?
        .ok_or(ApiError::not_found("broadcast"))?;

    Ok(Json(row.into_domain()?))
}

/// DELETE /me/broadcasts/{id} — SENT broadcasts are immutable history.
pub async fn delete_broadcast(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(broadcast_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_own_broadcast(&state, &claims, broadcast_id)?;

    if !state.db.delete_broadcast(&broadcast_id.to_string())? {
        return Err(ApiError::Conflict(
            "sent broadcasts cannot be deleted".into(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
