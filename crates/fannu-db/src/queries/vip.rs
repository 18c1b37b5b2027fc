use anyhow::Result;
use rusqlite::Row;

use super::{OptionalExt, now_str};
use crate::Database;
use crate::models::VipRow;

/// Result of a subscribe call, distinguishing the three transitions the
/// public join form reports back to the fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    Resubscribed,
    AlreadySubscribed,
}

impl Database {
    /// Subscribe a phone number to a creator's VIP list.
    ///
    /// The read and the conditional write run inside one `with_conn` closure,
    /// so no concurrent subscribe can interleave between them; combined with
    /// the UNIQUE(creator_id, phone) constraint, at most one row ever exists
    /// per pair.
    pub fn vip_subscribe(&self, id: &str, creator_id: &str, phone: &str) -> Result<SubscribeOutcome> {
        self.with_conn(|conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT status FROM vip_subscriptions
                     WHERE creator_id = ?1 AND phone = ?2",
                    [creator_id, phone],
                    |row| row.get(0),
                )
                .optional()?;

            match existing.as_deref() {
                None => {
                    let now = now_str();
                    conn.execute(
                        "INSERT INTO vip_subscriptions (id, creator_id, phone, status,
                                                        created_at, updated_at)
                         VALUES (?1, ?2, ?3, 'ACTIVE', ?4, ?4)
                         ON CONFLICT(creator_id, phone)
                         DO UPDATE SET status = 'ACTIVE', updated_at = ?4",
                        rusqlite::params![id, creator_id, phone, now],
                    )?;
                    Ok(SubscribeOutcome::Subscribed)
                }
                Some("ACTIVE") => Ok(SubscribeOutcome::AlreadySubscribed),
                Some(_) => {
                    conn.execute(
                        "UPDATE vip_subscriptions SET status = 'ACTIVE', updated_at = ?3
                         WHERE creator_id = ?1 AND phone = ?2",
                        rusqlite::params![creator_id, phone, now_str()],
                    )?;
                    Ok(SubscribeOutcome::Resubscribed)
                }
            }
        })
    }

    /// Unconditional opt-out. A missing pair is a silent no-op.
    pub fn vip_unsubscribe(&self, creator_id: &str, phone: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE vip_subscriptions SET status = 'UNSUBSCRIBED', updated_at = ?3
                 WHERE creator_id = ?1 AND phone = ?2",
                rusqlite::params![creator_id, phone, now_str()],
            )?;
            Ok(())
        })
    }

    pub fn list_active_vips(&self, creator_id: &str) -> Result<Vec<VipRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, creator_id, phone, status, created_at
                 FROM vip_subscriptions
                 WHERE creator_id = ?1 AND status = 'ACTIVE'
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map([creator_id], map_vip_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn count_vip_rows(&self, creator_id: &str, phone: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM vip_subscriptions WHERE creator_id = ?1 AND phone = ?2",
                [creator_id, phone],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }
}

fn map_vip_row(row: &Row<'_>) -> rusqlite::Result<VipRow> {
    Ok(VipRow {
        id: row.get(0)?,
        creator_id: row.get(1)?,
        phone: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}
