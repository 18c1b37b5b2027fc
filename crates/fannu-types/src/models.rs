use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Status enums --
// Stored as their SCREAMING_SNAKE names in SQLite TEXT columns; `as_str` /
// `parse` are the single source of truth for that mapping.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropKind {
    Event,
    Merch,
    Content,
    Custom,
}

impl DropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "EVENT",
            Self::Merch => "MERCH",
            Self::Content => "CONTENT",
            Self::Custom => "CUSTOM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EVENT" => Some(Self::Event),
            "MERCH" => Some(Self::Merch),
            "CONTENT" => Some(Self::Content),
            "CUSTOM" => Some(Self::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropStatus {
    Draft,
    Published,
}

impl DropStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "PUBLISHED" => Some(Self::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastSegment {
    All,
    Vip,
}

impl BroadcastSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Vip => "VIP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ALL" => Some(Self::All),
            "VIP" => Some(Self::Vip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastStatus {
    Draft,
    Scheduled,
    Sent,
    Cancelled,
}

impl BroadcastStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Scheduled => "SCHEDULED",
            Self::Sent => "SENT",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "SCHEDULED" => Some(Self::Scheduled),
            "SENT" => Some(Self::Sent),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VipStatus {
    Active,
    Unsubscribed,
}

impl VipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Unsubscribed => "UNSUBSCRIBED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "UNSUBSCRIBED" => Some(Self::Unsubscribed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

// -- Domain models --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: Uuid,
    pub slug: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub booking_enabled: bool,
    /// Hourly booking rate in minor currency units.
    pub booking_rate: Option<i64>,
    /// Deposit required up front, as a percentage of the quote.
    pub deposit_percent: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A time-boxed creator offer: event, merch, content, or custom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drop {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub kind: DropKind,
    pub title: String,
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price: i64,
    /// None means unlimited.
    pub capacity: Option<i64>,
    pub vip_only: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: DropStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub segment: BroadcastSegment,
    pub body: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: BroadcastStatus,
    pub created_at: DateTime<Utc>,
}

/// A fan's opt-in to a creator's messaging list, keyed by phone number.
/// At most one row exists per (creator, phone) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VipSubscription {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub phone: String,
    pub status: VipStatus,
    pub created_at: DateTime<Utc>,
}

/// A record of a paid engagement between creator and fan.
/// Read-only in this service; rendered on receipt and earnings pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub drop_id: Option<Uuid>,
    pub fan_name: String,
    pub fan_phone: String,
    pub amount: i64,
    pub deposit_amount: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_roundtrip() {
        assert_eq!(DropKind::parse("MERCH"), Some(DropKind::Merch));
        assert_eq!(DropKind::Merch.as_str(), "MERCH");
        assert_eq!(
            BroadcastStatus::parse("SCHEDULED"),
            Some(BroadcastStatus::Scheduled)
        );
        assert_eq!(VipStatus::parse("active"), None);
    }

    #[test]
    fn enums_serialize_screaming_snake() {
        let json = serde_json::to_string(&BookingStatus::Completed).unwrap();
        assert_eq!(json, "\"COMPLETED\"");
    }
}
