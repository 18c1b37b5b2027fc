use anyhow::Result;
use rusqlite::Row;

use super::{OptionalExt, now_str};
use crate::Database;
use crate::models::BookingRow;

/// Per-status earnings rollup row.
pub struct EarningsRow {
    pub status: String,
    pub count: i64,
    pub amount: i64,
}

impl Database {
    /// Bookings are written by the external payment flow; this insert exists
    /// for seeding and tests.
    pub fn insert_booking(
        &self,
        id: &str,
        creator_id: &str,
        drop_id: Option<&str>,
        fan_name: &str,
        fan_phone: &str,
        amount: i64,
        deposit_amount: i64,
        status: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bookings (id, creator_id, drop_id, fan_name, fan_phone,
                                       amount, deposit_amount, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    id, creator_id, drop_id, fan_name, fan_phone, amount, deposit_amount, status,
                    now_str()
                ],
            )?;
            Ok(())
        })
    }

    pub fn list_bookings(&self, creator_id: &str) -> Result<Vec<BookingRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, creator_id, drop_id, fan_name, fan_phone, amount,
                        deposit_amount, status, created_at
                 FROM bookings WHERE creator_id = ?1
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map([creator_id], map_booking_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Receipt page lookup: booking plus owning creator identity, one query.
    pub fn get_receipt(&self, booking_id: &str) -> Result<Option<(BookingRow, String, String)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT b.id, b.creator_id, b.drop_id, b.fan_name, b.fan_phone, b.amount,
                        b.deposit_amount, b.status, b.created_at, c.slug, c.display_name
                 FROM bookings b
                 JOIN creators c ON b.creator_id = c.id
                 WHERE b.id = ?1",
            )?;

            let row = stmt
                .query_row([booking_id], |row| {
                    Ok((map_booking_row(row)?, row.get(9)?, row.get(10)?))
                })
                .optional()?;

            Ok(row)
        })
    }

    pub fn earnings_by_status(&self, creator_id: &str) -> Result<Vec<EarningsRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT status, COUNT(*), COALESCE(SUM(amount), 0)
                 FROM bookings WHERE creator_id = ?1
                 GROUP BY status",
            )?;
            let rows = stmt
                .query_map([creator_id], |row| {
                    Ok(EarningsRow {
                        status: row.get(0)?,
                        count: row.get(1)?,
                        amount: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn map_booking_row(row: &Row<'_>) -> rusqlite::Result<BookingRow> {
    Ok(BookingRow {
        id: row.get(0)?,
        creator_id: row.get(1)?,
        drop_id: row.get(2)?,
        fan_name: row.get(3)?,
        fan_phone: row.get(4)?,
        amount: row.get(5)?,
        deposit_amount: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
    })
}
