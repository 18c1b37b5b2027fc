use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use fannu_db::models::CreatorRow;
use fannu_types::api::{Claims, CreateCreatorRequest, CreatorPageResponse, UpdateCreatorRequest};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::validation;

/// Look up the caller's creator profile; 404 until one has been created.
pub(crate) fn require_creator(state: &AppState, claims: &Claims) -> Result<CreatorRow, ApiError> {
    state
        .db
        .get_creator_by_user(&claims.sub.to_string())?
        .ok_or(ApiError::not_found("creator profile"))
}

/// GET /me/creator
pub async fn get_my_creator(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let row = require_creator(&state, &claims)?;
    Ok(Json(row.into_domain()?))
}

/// POST /me/creator — one profile per account.
pub async fn create_my_creator(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateCreatorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = vec![];
    validation::validate_slug(&req.slug, &mut errors);
    validation::validate_display_name(&req.display_name, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let user_id = claims.sub.to_string();
    if state.db.get_creator_by_user(&user_id)?.is_some() {
        return Err(ApiError::Conflict("creator profile already exists".into()));
    }
    if state.db.slug_taken(&req.slug)? {
        return Err(ApiError::Conflict(format!("slug '{}' is taken", req.slug)));
    }

    let id = Uuid::new_v4().to_string();
    state.db.create_creator(
        &id,
        &user_id,
        &req.slug,
        &req.display_name,
        req.bio.as_deref(),
    )?;

    let row = state
        .db
        .get_creator_by_user(&user_id)?
        .ok_or_else(|| anyhow::anyhow!("creator vanished after insert"))?;

    Ok((StatusCode::CREATED, Json(row.into_domain()?)))
}

/// PUT /me/creator — settings action. Absent fields keep their current
/// values; booking settings are validated before the write.
pub async fn update_my_creator(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateCreatorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let current = require_creator(&state, &claims)?;

    let display_name = req.display_name.unwrap_or(current.display_name);
    let bio = req.bio.or(current.bio);
    let booking_enabled = req.booking_enabled.unwrap_or(current.booking_enabled);
    let booking_rate = req.booking_rate.or(current.booking_rate);
    let deposit_percent = req.deposit_percent.or(current.deposit_percent);

    let mut errors = vec![];
    validation::validate_display_name(&display_name, &mut errors);
    validation::validate_booking_settings(booking_rate, deposit_percent, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    state.db.update_creator(
        &current.id,
        &display_name,
        bio.as_deref(),
        booking_enabled,
        booking_rate,
        deposit_percent,
    )?;

    let row = state
        .db
        .get_creator_by_user(&claims.sub.to_string())?
        .ok_or(ApiError::not_found("creator profile"))?;

    Ok(Json(row.into_domain()?))
}

/// GET /creators/{slug} — public creator page: profile plus published drops.
pub async fn get_creator_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Run blocking DB reads off the async runtime
    let db = state.clone();
    let page = tokio::task::spawn_blocking(move || {
        let Some(row) = db.db.get_creator_by_slug(&slug)? else {
            return Ok(None);
        };
        let drops = db.db.list_published_drops(&row.id)?;
        Ok::<_, anyhow::Error>(Some((row, drops)))
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    let (row, drop_rows) = page.ok_or(ApiError::not_found("creator"))?;

    let drops = drop_rows
        .into_iter()
        .map(|r| r.into_domain())
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Json(CreatorPageResponse {
        creator: row.into_domain()?,
        drops,
    }))
}
