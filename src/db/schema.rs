// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run, and each migration is a function that
// executes SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Blocked-phrase rules the tone scorer checks against.
        -- Row order (id) is the order rules are evaluated in.
        CREATE TABLE IF NOT EXISTS blocked_phrases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phrase TEXT NOT NULL,
            suggestion TEXT NOT NULL DEFAULT '',
            severity TEXT NOT NULL,            -- error / warning / info
            applies_to TEXT NOT NULL,          -- JSON array of account identifiers
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- History of tone checks
        CREATE TABLE IF NOT EXISTS tone_checks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account TEXT NOT NULL,
            text_preview TEXT NOT NULL,
            score INTEGER NOT NULL,            -- 0 to 100
            issues TEXT NOT NULL,              -- JSON array of issues
            checked_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Free-form key/value state (last import, last check, ...)
        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for per-account history and averages
        CREATE INDEX IF NOT EXISTS idx_checks_account
            ON tone_checks(account);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: remember which platform a check was written for, so
    // history can be filtered per channel.
    run_migration(conn, 2, |c| {
        c.execute_batch("ALTER TABLE tone_checks ADD COLUMN platform TEXT;")
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
