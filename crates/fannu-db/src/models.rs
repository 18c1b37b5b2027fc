//! Database row types: these map directly to SQLite rows. Distinct from the
//! fannu-types domain models to keep the DB layer independent; `into_domain`
//! conversions do the uuid/timestamp/enum parsing in one place.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use fannu_types::models::{
    Booking, BookingStatus, Broadcast, BroadcastSegment, BroadcastStatus, Creator, Drop, DropKind,
    DropStatus, VipStatus, VipSubscription,
};

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct CreatorRow {
    pub id: String,
    pub user_id: String,
    pub slug: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub booking_enabled: bool,
    pub booking_rate: Option<i64>,
    pub deposit_percent: Option<i64>,
    pub created_at: String,
}

pub struct DropRow {
    pub id: String,
    pub creator_id: String,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub capacity: Option<i64>,
    pub vip_only: bool,
    pub starts_at: String,
    pub ends_at: Option<String>,
    pub status: String,
    pub created_at: String,
}

pub struct BroadcastRow {
    pub id: String,
    pub creator_id: String,
    pub segment: String,
    pub body: String,
    pub scheduled_at: Option<String>,
    pub status: String,
    pub created_at: String,
}

pub struct VipRow {
    pub id: String,
    pub creator_id: String,
    pub phone: String,
    pub status: String,
    pub created_at: String,
}

pub struct BookingRow {
    pub id: String,
    pub creator_id: String,
    pub drop_id: Option<String>,
    pub fan_name: String,
    pub fan_phone: String,
    pub amount: i64,
    pub deposit_amount: i64,
    pub status: String,
    pub created_at: String,
}

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid> {
    s.parse().map_err(|e| anyhow!("corrupt uuid '{}': {}", s, e))
}

pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("corrupt timestamp '{}': {}", s, e))
}

fn parse_ts_opt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    s.map(parse_ts).transpose()
}

impl CreatorRow {
    pub fn into_domain(self) -> Result<Creator> {
        Ok(Creator {
            id: parse_uuid(&self.id)?,
            slug: self.slug,
            display_name: self.display_name,
            bio: self.bio,
            booking_enabled: self.booking_enabled,
            booking_rate: self.booking_rate,
            deposit_percent: self.deposit_percent,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl DropRow {
    pub fn into_domain(self) -> Result<Drop> {
        Ok(Drop {
            id: parse_uuid(&self.id)?,
            creator_id: parse_uuid(&self.creator_id)?,
            kind: DropKind::parse(&self.kind)
                .ok_or_else(|| anyhow!("corrupt drop kind '{}'", self.kind))?,
            title: self.title,
            description: self.description,
            price: self.price,
            capacity: self.capacity,
            vip_only: self.vip_only,
            starts_at: parse_ts(&self.starts_at)?,
            ends_at: parse_ts_opt(self.ends_at.as_deref())?,
            status: DropStatus::parse(&self.status)
                .ok_or_else(|| anyhow!("corrupt drop status '{}'", self.status))?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl BroadcastRow {
    pub fn into_domain(self) -> Result<Broadcast> {
        Ok(Broadcast {
            id: parse_uuid(&self.id)?,
            creator_id: parse_uuid(&self.creator_id)?,
            segment: BroadcastSegment::parse(&self.segment)
                .ok_or_else(|| anyhow!("corrupt broadcast segment '{}'", self.segment))?,
            body: self.body,
            scheduled_at: parse_ts_opt(self.scheduled_at.as_deref())?,
            status: BroadcastStatus::parse(&self.status)
                .ok_or_else(|| anyhow!("corrupt broadcast status '{}'", self.status))?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl VipRow {
    pub fn into_domain(self) -> Result<VipSubscription> {
        Ok(VipSubscription {
            id: parse_uuid(&self.id)?,
            creator_id: parse_uuid(&self.creator_id)?,
            phone: self.phone,
            status: VipStatus::parse(&self.status)
                .ok_or_else(|| anyhow!("corrupt vip status '{}'", self.status))?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

impl BookingRow {
    pub fn into_domain(self) -> Result<Booking> {
        Ok(Booking {
            id: parse_uuid(&self.id)?,
            creator_id: parse_uuid(&self.creator_id)?,
            drop_id: self.drop_id.as_deref().map(parse_uuid).transpose()?,
            fan_name: self.fan_name,
            fan_phone: self.fan_phone,
            amount: self.amount,
            deposit_amount: self.deposit_amount,
            status: BookingStatus::parse(&self.status)
                .ok_or_else(|| anyhow!("corrupt booking status '{}'", self.status))?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}
