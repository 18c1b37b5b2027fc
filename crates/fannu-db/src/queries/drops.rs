use anyhow::Result;
use rusqlite::{Connection, Row};

use super::{OptionalExt, now_str};
use crate::Database;
use crate::models::DropRow;

const DROP_COLUMNS: &str = "id, creator_id, kind, title, description, price, capacity,
                            vip_only, starts_at, ends_at, status, created_at";

pub struct NewDrop<'a> {
    pub id: &'a str,
    pub creator_id: &'a str,
    pub kind: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub price: i64,
    pub capacity: Option<i64>,
    pub vip_only: bool,
    pub starts_at: &'a str,
    pub ends_at: Option<&'a str>,
}

impl Database {
    pub fn insert_drop(&self, drop: &NewDrop<'_>) -> Result<()> {
        self.with_conn(|conn| {
            let now = now_str();
            conn.execute(
                "INSERT INTO drops (id, creator_id, kind, title, description, price, capacity,
                                    vip_only, starts_at, ends_at, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 'DRAFT', ?11, ?11)",
                rusqlite::params![
                    drop.id,
                    drop.creator_id,
                    drop.kind,
                    drop.title,
                    drop.description,
                    drop.price,
                    drop.capacity,
                    drop.vip_only,
                    drop.starts_at,
                    drop.ends_at,
                    now
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_drop(&self, id: &str) -> Result<Option<DropRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM drops WHERE id = ?1", DROP_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let row = stmt.query_row([id], map_drop_row).optional()?;
            Ok(row)
        })
    }

    /// All of a creator's drops regardless of status, for the dashboard.
    pub fn list_drops(&self, creator_id: &str) -> Result<Vec<DropRow>> {
        self.with_conn(|conn| {
            query_drops(conn, creator_id, false)
        })
    }

    /// Published drops only, for the public creator page.
    pub fn list_published_drops(&self, creator_id: &str) -> Result<Vec<DropRow>> {
        self.with_conn(|conn| {
            query_drops(conn, creator_id, true)
        })
    }

    /// Field update; the handler merges partial input before calling.
    pub fn update_drop(
        &self,
        id: &str,
        title: &str,
        description: Option<&str>,
        price: i64,
        capacity: Option<i64>,
        vip_only: bool,
        starts_at: &str,
        ends_at: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE drops
                 SET title = ?2, description = ?3, price = ?4, capacity = ?5,
                     vip_only = ?6, starts_at = ?7, ends_at = ?8, updated_at = ?9
                 WHERE id = ?1",
                rusqlite::params![
                    id, title, description, price, capacity, vip_only, starts_at, ends_at,
                    now_str()
                ],
            )?;
            Ok(())
        })
    }

    pub fn publish_drop(&self, id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE drops SET status = 'PUBLISHED', updated_at = ?2 WHERE id = ?1",
                rusqlite::params![id, now_str()],
            )?;
            Ok(())
        })
    }

    pub fn delete_drop(&self, id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM drops WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn query_drops(conn: &Connection, creator_id: &str, published_only: bool) -> Result<Vec<DropRow>> {
    let sql = if published_only {
        format!(
            "SELECT {} FROM drops
             WHERE creator_id = ?1 AND status = 'PUBLISHED'
             ORDER BY starts_at ASC",
            DROP_COLUMNS
        )
    } else {
        format!(
            "SELECT {} FROM drops WHERE creator_id = ?1 ORDER BY created_at DESC",
            DROP_COLUMNS
        )
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([creator_id], map_drop_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_drop_row(row: &Row<'_>) -> rusqlite::Result<DropRow> {
    Ok(DropRow {
        id: row.get(0)?,
        creator_id: row.get(1)?,
        kind: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        price: row.get(5)?,
        capacity: row.get(6)?,
        vip_only: row.get(7)?,
        starts_at: row.get(8)?,
        ends_at: row.get(9)?,
        status: row.get(10)?,
        created_at: row.get(11)?,
    })
}
