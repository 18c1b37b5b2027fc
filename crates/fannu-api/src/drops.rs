use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use fannu_db::models::DropRow;
use fannu_db::queries::drops::NewDrop;
use fannu_types::api::{Claims, CreateDropRequest, UpdateDropRequest};
use fannu_types::models::DropStatus;

use crate::auth::AppState;
use crate::creators::require_creator;
use crate::error::ApiError;
use crate::validation;

/// Fetch a drop and verify it belongs to the caller's creator profile.
/// Foreign rows 404 rather than 403: their existence is not disclosed.
fn require_own_drop(
    state: &AppState,
    claims: &Claims,
    drop_id: Uuid,
) -> Result<DropRow, ApiError> {
    let creator = require_creator(state, claims)?;
    let row = state
        .db
        .get_drop(&drop_id.to_string())?
        .ok_or(ApiError::not_found("drop"))?;
    if row.creator_id != creator.id {
        return Err(ApiError::not_found("drop"));
    }
    Ok(row)
}

/// GET /me/drops — all states, newest first.
pub async fn list_my_drops(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;
    let rows = state.db.list_drops(&creator.id)?;
    let drops = rows
        .into_iter()
        .map(|r| r.into_domain())
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Json(drops))
}

/// POST /me/drops — new drops always start as DRAFT.
pub async fn create_drop(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateDropRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;

    let mut errors = vec![];
    let kind = validation::validate_drop_kind(&req.kind, &mut errors);
    validation::validate_drop_fields(
        &req.title,
        req.description.as_deref(),
        req.price,
        req.capacity,
        req.starts_at,
        req.ends_at,
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let kind = kind.ok_or_else(|| anyhow::anyhow!("kind parsed but missing"))?;

    let id = Uuid::new_v4().to_string();
    let starts_at = req.starts_at.to_rfc3339();
    let ends_at = req.ends_at.map(|t| t.to_rfc3339());

    state.db.insert_drop(&NewDrop {
        id: &id,
        creator_id: &creator.id,
        kind: kind.as_str(),
        title: &req.title,
        description: req.description.as_deref(),
        price: req.price,
        capacity: req.capacity,
        vip_only: req.vip_only,
        starts_at: &starts_at,
        ends_at: ends_at.as_deref(),
    })?;

    let row = state
        .db
        .get_drop(&id)?
        .ok_or_else(|| anyhow::anyhow!("drop vanished after insert"))?;

    Ok((StatusCode::CREATED, Json(row.into_domain()?)))
}

/// PUT /me/drops/{id} — partial update merged over current values.
pub async fn update_drop(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(drop_id): Path<Uuid>,
    Json(req): Json<UpdateDropRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let current = require_own_drop(&state, &claims, drop_id)?.into_domain()?;

    let title = req.title.unwrap_or(current.title);
    let description = req.description.or(current.description);
    let price = req.price.unwrap_or(current.price);
    let capacity = req.capacity.or(current.capacity);
    let vip_only = req.vip_only.unwrap_or(current.vip_only);
    let starts_at = req.starts_at.unwrap_or(current.starts_at);
    let ends_at = req.ends_at.or(current.ends_at);

    let mut errors = vec![];
    validation::validate_drop_fields(
        &title,
        description.as_deref(),
        price,
        capacity,
        starts_at,
        ends_at,
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let id = drop_id.to_string();
    state.db.update_drop(
        &id,
        &title,
        description.as_deref(),
        price,
        capacity,
        vip_only,
        &starts_at.to_rfc3339(),
        ends_at.map(|t| t.to_rfc3339()).as_deref(),
    )?;

    let row = state
        .db
        .get_drop(&id)?
        .ok_or(ApiError::not_found("drop"))?;

    Ok(Json(row.into_domain()?))
}

/// POST /me/drops/{id}/publish
pub async fn publish_drop(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(drop_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_own_drop(&state, &claims, drop_id)?;

    let id = drop_id.to_string();
    state.db.publish_drop(&id)?;

    let row = state
        .db
        .get_drop(&id)?
        .ok_or(ApiError::not_found("drop"))?;

    Ok(Json(row.into_domain()?))
}

/// DELETE /me/drops/{id}
pub async fn delete_drop(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(drop_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    require_own_drop(&state, &claims, drop_id)?;
    state.db.delete_drop(&drop_id.to_string())?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /drops/{id} — public drop page; drafts are invisible.
pub async fn get_public_drop(
    State(state): State<AppState>,
    Path(drop_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .db
        .get_drop(&drop_id.to_string())?
        .ok_or(ApiError::not_found("drop"))?;

    let drop = row.into_domain()?;
    if drop.status != DropStatus::Published {
        return Err(ApiError::not_found("drop"));
    }

    Ok(Json(drop))
}
