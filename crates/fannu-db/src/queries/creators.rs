use anyhow::Result;
use rusqlite::{Connection, Row};

use super::{OptionalExt, now_str};
use crate::Database;
use crate::models::CreatorRow;

impl Database {
    pub fn create_creator(
        &self,
        id: &str,
        user_id: &str,
        slug: &str,
        display_name: &str,
        bio: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            let now = now_str();
            conn.execute(
                "INSERT INTO creators (id, user_id, slug, display_name, bio, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                rusqlite::params![id, user_id, slug, display_name, bio, now],
            )?;
            Ok(())
        })
    }

    pub fn get_creator_by_user(&self, user_id: &str) -> Result<Option<CreatorRow>> {
        self.with_conn(|conn| {
            query_creator(conn, "user_id", user_id)
        })
    }

    pub fn get_creator_by_slug(&self, slug: &str) -> Result<Option<CreatorRow>> {
        self.with_conn(|conn| query_creator(conn, "slug", slug))
    }

    pub fn slug_taken(&self, slug: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM creators WHERE slug = ?1",
                [slug],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
    }

    /// Settings update; the handler merges partial input into the full set
    /// before calling.
    pub fn update_creator(
        &self,
        id: &str,
        display_name: &str,
        bio: Option<&str>,
        booking_enabled: bool,
        booking_rate: Option<i64>,
        deposit_percent: Option<i64>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE creators
                 SET display_name = ?2, bio = ?3, booking_enabled = ?4,
                     booking_rate = ?5, deposit_percent = ?6, updated_at = ?7
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    display_name,
                    bio,
                    booking_enabled,
                    booking_rate,
                    deposit_percent,
                    now_str()
                ],
            )?;
            Ok(())
        })
    }
}

fn query_creator(conn: &Connection, column: &str, value: &str) -> Result<Option<CreatorRow>> {
    // `column` is a compile-time constant at every call site, never user input.
    let sql = format!(
        "SELECT id, user_id, slug, display_name, bio, booking_enabled,
                booking_rate, deposit_percent, created_at
         FROM creators WHERE {} = ?1",
        column
    );

    let mut stmt = conn.prepare(&sql)?;
    let row = stmt.query_row([value], map_creator_row).optional()?;
    Ok(row)
}

fn map_creator_row(row: &Row<'_>) -> rusqlite::Result<CreatorRow> {
    Ok(CreatorRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        slug: row.get(2)?,
        display_name: row.get(3)?,
        bio: row.get(4)?,
        booking_enabled: row.get(5)?,
        booking_rate: row.get(6)?,
        deposit_percent: row.get(7)?,
        created_at: row.get(8)?,
    })
}
