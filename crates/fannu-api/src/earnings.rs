use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use fannu_types::api::{Claims, EarningsBucket, EarningsResponse, ReceiptResponse};
use fannu_types::models::BookingStatus;

use crate::auth::AppState;
use crate::creators::require_creator;
use crate::error::ApiError;

/// GET /me/earnings — per-status rollup; `total` counts money the creator
/// has actually secured (CONFIRMED and COMPLETED).
pub async fn get_my_earnings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;

    let rows = state.db.earnings_by_status(&creator.id)?;

    let mut total = 0i64;
    let mut breakdown = Vec::with_capacity(rows.len());
    for row in rows {
        let status = BookingStatus::parse(&row.status)
            .ok_or_else(|| anyhow::anyhow!("corrupt booking status '{}'", row.status))?;
        if matches!(status, BookingStatus::Confirmed | BookingStatus::Completed) {
            total += row.amount;
        }
        breakdown.push(EarningsBucket {
            status,
            count: row.count,
            amount: row.amount,
        });
    }

    Ok(Json(EarningsResponse { total, breakdown }))
}

/// GET /me/bookings — newest first.
pub async fn list_my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = require_creator(&state, &claims)?;

    let rows = state.db.list_bookings(&creator.id)?;
    let bookings = rows
        .into_iter()
        .map(|r| r.into_domain())
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Json(bookings))
}

/// GET /receipts/{id} — public receipt page. Receipt ids are unguessable
/// UUIDs handed to the fan at payment time; that is the whole access model,
/// matching the public receipt links the dashboard shares.
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (row, slug, display_name) = state
        .db
        .get_receipt(&booking_id.to_string())?
        .ok_or(ApiError::not_found("receipt"))?;

    Ok(Json(ReceiptResponse {
        booking: row.into_domain()?,
        creator_slug: slug,
        creator_display_name: display_name,
    }))
}
