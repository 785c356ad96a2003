use crate::ui::messages::warning;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `audit` table exists.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `pass_log` table exists.
fn pass_log_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='pass_log'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `pass_log` table has a `created_at` column.
fn pass_log_has_created_at(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('pass_log')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "created_at" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `pass_log` table with the modern schema.
///
/// Column layout mirrors the paper log sheet it replaces: one row per event, times
/// stored as "H:MM AM/PM" text, empty string meaning "unset". Rows are
/// appended and (same-day only) updated in place; never deleted.
fn create_pass_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pass_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            student     TEXT NOT NULL,
            student_id  TEXT NOT NULL DEFAULT '',
            category    TEXT NOT NULL CHECK(category IN ('G','B')),
            teacher     TEXT NOT NULL DEFAULT '',
            out_time    TEXT NOT NULL DEFAULT '',
            back_time   TEXT NOT NULL DEFAULT '',
            hold_notice TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_pass_log_date ON pass_log(date);
        CREATE INDEX IF NOT EXISTS idx_pass_log_date_student ON pass_log(date, student);
        "#,
    )?;
    Ok(())
}

/// Migrate an old `pass_log` table to include the `created_at` column
/// (used by the double-submission guard; older databases predate it).
fn migrate_add_created_at(conn: &Connection) -> Result<()> {
    if !pass_log_table_exists(conn)? {
        return Ok(());
    }

    if pass_log_has_created_at(conn)? {
        return Ok(());
    }

    warning("Adding 'created_at' column to pass_log table...");

    conn.execute_batch(
        r#"
        ALTER TABLE pass_log ADD COLUMN created_at TEXT NOT NULL DEFAULT '';
        "#,
    )?;
    Ok(())
}

/// Run all pending schema migrations, oldest first. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_audit_table(conn)?;
    create_pass_log_table(conn)?;
    migrate_add_created_at(conn)?;
    Ok(())
}
