use anyhow::Result;
use rusqlite::Row;

use super::{OptionalExt, now_str};
use crate::Database;
use crate::models::BroadcastRow;

impl Database {
    pub fn insert_broadcast(
        &self,
        id: &str,
        creator_id: &str,
        segment: &str,
        body: &str,
        scheduled_at: Option<&str>,
        status: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            let now = now_str();
            conn.execute(
                "INSERT INTO broadcasts (id, creator_id, segment, body, scheduled_at, status,
                                         created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                rusqlite::params![id, creator_id, segment, body, scheduled_at, status, now],
            )?;
            Ok(())
        })
    }

    pub fn get_broadcast(&self, id: &str) -> Result<Option<BroadcastRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, creator_id, segment, body, scheduled_at, status, created_at
                 FROM broadcasts WHERE id = ?1",
            )?;
            let row = stmt.query_row([id], map_broadcast_row).optional()?;
            Ok(row)
        })
    }

    pub fn list_broadcasts(&self, creator_id: &str) -> Result<Vec<BroadcastRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, creator_id, segment, body, scheduled_at, status, created_at
                 FROM broadcasts WHERE creator_id = ?1
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map([creator_id], map_broadcast_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Guarded transition: only a SCHEDULED broadcast can be cancelled.
    /// Returns false when the precondition no longer holds.
    pub fn cancel_broadcast(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE broadcasts SET status = 'CANCELLED', updated_at = ?2
                 WHERE id = ?1 AND status = 'SCHEDULED'",
                rusqlite::params![id, now_str()],
            )?;
            Ok(changed > 0)
        })
    }

    /// Recorded by the external delivery mechanism once a scheduled
    /// broadcast has gone out.
    pub fn mark_broadcast_sent(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE broadcasts SET status = 'SENT', updated_at = ?2
                 WHERE id = ?1 AND status = 'SCHEDULED'",
                rusqlite::params![id, now_str()],
            )?;
            Ok(changed > 0)
        })
    }

    /// Guarded delete: SENT broadcasts are immutable history.
    pub fn delete_broadcast(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "DELETE FROM broadcasts WHERE id = ?1 AND status != 'SENT'",
                [id],
            )?;
            Ok(changed > 0)
        })
    }
}

fn map_broadcast_row(row: &Row<'_>) -> rusqlite::Result<BroadcastRow> {
    Ok(BroadcastRow {
        id: row.get(0)?,
        creator_id: row.get(1)?,
        segment: row.get(2)?,
        body: row.get(3)?,
        scheduled_at: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
    })
}
