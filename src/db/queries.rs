//! Pass-log store access: full-day scans, appends, and the three targeted
//! single-field updates the core is allowed to make (close a pass, promote
//! a waiting row, rewrite a hold notice). No deletes.

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::category::Category;
use crate::models::record::Record;
use crate::ui::messages::warning;
use crate::utils::time::ParsedTime;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

/// Raw cell values of one row, before validation.
struct RawRow {
    id: i64,
    date: String,
    student: String,
    student_id: String,
    category: String,
    teacher: String,
    out_time: String,
    back_time: String,
    hold_notice: String,
    created_at: String,
}

fn map_row(row: &Row) -> Result<RawRow> {
    Ok(RawRow {
        id: row.get("id")?,
        date: row.get("date")?,
        student: row.get("student")?,
        student_id: row.get("student_id")?,
        category: row.get("category")?,
        teacher: row.get("teacher")?,
        out_time: row.get("out_time")?,
        back_time: row.get("back_time")?,
        hold_notice: row.get("hold_notice")?,
        created_at: row.get("created_at")?,
    })
}

/// Validate a raw row into a Record. Err carries the anomaly description.
fn refine_row(raw: RawRow) -> std::result::Result<Record, String> {
    if raw.student.trim().is_empty() {
        return Err(format!("row {}: missing student name", raw.id));
    }

    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|_| format!("row {}: unparseable date '{}'", raw.id, raw.date))?;

    let category = Category::from_db_str(&raw.category)
        .ok_or_else(|| format!("row {}: unknown category '{}'", raw.id, raw.category))?;

    let out_time = if raw.out_time.trim().is_empty() {
        None
    } else {
        Some(
            ParsedTime::from_cell(&raw.out_time)
                .ok_or_else(|| format!("row {}: unparseable out time '{}'", raw.id, raw.out_time))?,
        )
    };

    let back_time = if raw.back_time.trim().is_empty() {
        None
    } else {
        Some(ParsedTime::from_cell(&raw.back_time).ok_or_else(|| {
            format!("row {}: unparseable back time '{}'", raw.id, raw.back_time)
        })?)
    };

    Ok(Record {
        id: raw.id,
        date,
        student: raw.student,
        student_id: raw.student_id,
        category,
        teacher: raw.teacher,
        out_time,
        back_time,
        hold_notice: raw.hold_notice,
        created_at: raw.created_at,
    })
}

/// Full-day scan in append order (rowid ASC; ties in timestamp resolve by
/// physical position, which is chronological for an append-only log).
///
/// A malformed row is skipped with a warning, never aborting the scan: one
/// bad historical row must not blind the system to every other student.
pub fn load_records_by_date(pool: &mut DbPool, date: &NaiveDate) -> AppResult<Vec<Record>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM pass_log
         WHERE date = ?1
         ORDER BY id ASC",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map([date_str], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        match refine_row(r?) {
            Ok(rec) => out.push(rec),
            Err(anomaly) => warning(format!("skipping malformed log row ({})", anomaly)),
        }
    }
    Ok(out)
}

/// Dump every row of the log, oldest first, without refinement (raw view
/// for the `log --print` command and external audits).
pub fn dump_rows(
    pool: &mut DbPool,
    date: Option<&NaiveDate>,
) -> AppResult<Vec<(i64, String, String, String, String, String, String, String)>> {
    let sql = match date {
        Some(_) => {
            "SELECT id, date, student, student_id, category, out_time, back_time, hold_notice
             FROM pass_log WHERE date = ?1 ORDER BY id ASC"
        }
        None => {
            "SELECT id, date, student, student_id, category, out_time, back_time, hold_notice
             FROM pass_log ORDER BY id ASC"
        }
    };

    let mut stmt = pool.conn.prepare(sql)?;
    let mapper = |row: &Row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
        ))
    };

    let rows = match date {
        Some(d) => stmt.query_map([d.format("%Y-%m-%d").to_string()], mapper)?,
        None => stmt.query_map([], mapper)?,
    };

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Append a new record. Returns the rowid.
pub fn append_record(conn: &Connection, rec: &Record) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO pass_log (date, student, student_id, category, teacher, out_time, back_time, hold_notice, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.date_str(),
            rec.student,
            rec.student_id,
            rec.category.to_db_str(),
            rec.teacher,
            rec.out_time_str(),
            rec.back_time_str(),
            rec.hold_notice,
            rec.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close an open pass: set `back_time` on the given row.
pub fn set_back_time(conn: &Connection, row_id: i64, back_time: &ParsedTime) -> AppResult<()> {
    conn.execute(
        "UPDATE pass_log SET back_time = ?1 WHERE id = ?2",
        params![back_time.to_cell(), row_id],
    )?;
    Ok(())
}

/// Promote a waiting row to a granted pass: set `out_time`, clear the
/// hold notice.
pub fn promote_row(conn: &Connection, row_id: i64, out_time: &ParsedTime) -> AppResult<()> {
    conn.execute(
        "UPDATE pass_log SET out_time = ?1, hold_notice = '' WHERE id = ?2",
        params![out_time.to_cell(), row_id],
    )?;
    Ok(())
}

/// Rewrite the hold notice of a waiting row (position recalculation).
pub fn rewrite_hold_notice(conn: &Connection, row_id: i64, notice: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE pass_log SET hold_notice = ?1 WHERE id = ?2",
        params![notice, row_id],
    )?;
    Ok(())
}
