use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS creators (
            id              TEXT PRIMARY KEY,
            user_id         TEXT NOT NULL UNIQUE REFERENCES users(id),
            slug            TEXT NOT NULL UNIQUE,
            display_name    TEXT NOT NULL,
            bio             TEXT,
            booking_enabled INTEGER NOT NULL DEFAULT 0,
            booking_rate    INTEGER,
            deposit_percent INTEGER,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS drops (
            id          TEXT PRIMARY KEY,
            creator_id  TEXT NOT NULL REFERENCES creators(id),
            kind        TEXT NOT NULL,
            title       TEXT NOT NULL,
            description TEXT,
            price       INTEGER NOT NULL,
            capacity    INTEGER,
            vip_only    INTEGER NOT NULL DEFAULT 0,
            starts_at   TEXT NOT NULL,
            ends_at     TEXT,
            status      TEXT NOT NULL DEFAULT 'DRAFT',
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_drops_creator
            ON drops(creator_id, status);

        CREATE TABLE IF NOT EXISTS broadcasts (
            id           TEXT PRIMARY KEY,
            creator_id   TEXT NOT NULL REFERENCES creators(id),
            segment      TEXT NOT NULL,
            body         TEXT NOT NULL,
            scheduled_at TEXT,
            status       TEXT NOT NULL DEFAULT 'DRAFT',
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_broadcasts_creator
            ON broadcasts(creator_id, created_at);

        CREATE TABLE IF NOT EXISTS vip_subscriptions (
            id          TEXT PRIMARY KEY,
            creator_id  TEXT NOT NULL REFERENCES creators(id),
            phone       TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'ACTIVE',
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            UNIQUE(creator_id, phone)
        );

        CREATE INDEX IF NOT EXISTS idx_vip_creator
            ON vip_subscriptions(creator_id, status);

        CREATE TABLE IF NOT EXISTS bookings (
            id              TEXT PRIMARY KEY,
            creator_id      TEXT NOT NULL REFERENCES creators(id),
            drop_id         TEXT REFERENCES drops(id),
            fan_name        TEXT NOT NULL,
            fan_phone       TEXT NOT NULL,
            amount          INTEGER NOT NULL,
            deposit_amount  INTEGER NOT NULL DEFAULT 0,
            status          TEXT NOT NULL DEFAULT 'PENDING',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bookings_creator
            ON bookings(creator_id, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
