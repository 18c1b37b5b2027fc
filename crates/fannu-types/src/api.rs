use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, Creator, Drop};

// -- JWT Claims --

/// JWT claims shared between the auth handlers that mint tokens and the
/// middleware that validates them. Canonical definition lives here in
/// fannu-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Creator profile --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCreatorRequest {
    pub slug: String,
    pub display_name: String,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCreatorRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub booking_enabled: Option<bool>,
    pub booking_rate: Option<i64>,
    pub deposit_percent: Option<i64>,
}

/// Public creator page payload: profile plus currently published drops.
#[derive(Debug, Serialize)]
pub struct CreatorPageResponse {
    pub creator: Creator,
    pub drops: Vec<Drop>,
}

// -- Drops --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDropRequest {
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub capacity: Option<i64>,
    #[serde(default)]
    pub vip_only: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDropRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub capacity: Option<i64>,
    pub vip_only: Option<bool>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

// -- Broadcasts --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBroadcastRequest {
    pub segment: String,
    pub body: String,
    /// When present the broadcast is created SCHEDULED; otherwise DRAFT.
    pub scheduled_at: Option<DateTime<Utc>>,
}

// -- VIP list --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VipJoinRequest {
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct VipJoinResponse {
    pub subscribed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub resubscribed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub already_subscribed: bool,
}

#[derive(Debug, Serialize)]
pub struct VipSubscriberEntry {
    pub phone: String,
    pub joined_at: DateTime<Utc>,
}

// -- Earnings / bookings --

#[derive(Debug, Serialize)]
pub struct EarningsResponse {
    /// Sum over CONFIRMED and COMPLETED bookings, minor units.
    pub total: i64,
    pub breakdown: Vec<EarningsBucket>,
}

#[derive(Debug, Serialize)]
pub struct EarningsBucket {
    pub status: BookingStatus,
    pub count: i64,
    pub amount: i64,
}

/// Public receipt page payload.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub booking: Booking,
    pub creator_slug: String,
    pub creator_display_name: String,
}
