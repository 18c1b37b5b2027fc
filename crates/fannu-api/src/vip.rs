use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use fannu_db::SubscribeOutcome;
use fannu_types::api::{Claims, VipJoinRequest, VipJoinResponse, VipSubscriberEntry};

use crate::auth::AppState;
use crate::creators::require_creator;
use crate::error::ApiError;
use crate::validation;

/// POST /creators/{slug}/vip/subscribe — public join form. Success always
/// reports `subscribed: true`; the flags distinguish the transition taken.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<VipJoinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = vec![];
    validation::validate_phone(&req.phone, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let creator = state
        .db
        .get_creator_by_slug(&slug)?
        .ok_or(ApiError::not_found("creator"))?;

    let outcome = state
        .db
        .vip_subscribe(&Uuid::new_v4().to_string(), &creator.id, &req.phone)?;

    let status = if outcome == SubscribeOutcome::Subscribed {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(VipJoinResponse {
            subscribed: true,
            resubscribed: outcome == SubscribeOutcome::Resubscribed,
            already_subscribed: outcome == SubscribeOutcome::AlreadySubscribed,
        }),
    ))
}

/// POST /creators/{slug}/vip/unsubscribe — opting out of a list you were
/// never on succeeds silently.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<VipJoinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut errors = vec![];
    validation::validate_phone(&req.phone, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let creator = state
        .db
        .get_creator_by_slug(&slug)?
        .ok_or(ApiError::not_found("creator"))?;

    state.db.vip_unsubscribe(&creator.id, &req.phone)?;

    Ok(Json(serde_json::json!({ "unsubscribed": true })))
}

/// GET /me/vip — the creator's active subscriber list.
pub async fn list_my_subscribers(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;

    let rows = state.db.list_active_vips(&creator.id)?;
    let subscribers = rows
        .into_iter()
        .map(|r| {
            let sub = r.into_domain()?;
            Ok(VipSubscriberEntry {
                phone: sub.phone,
                joined_at: sub.created_at,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Json(subscribers))
}
