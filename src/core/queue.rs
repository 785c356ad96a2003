//! FIFO waiting-line manager.
//!
//! The queue is never stored as its own structure: it is implied by the
//! waiting rows of the day, ordered by the position number embedded in
//! their hold notices. Positions are always recomputed to a dense 1..N,
//! never incremented in place, so they cannot drift after arbitrary
//! promotions and returns.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::category::Category;
use crate::models::record::Record;
use crate::models::status::Status;
use crate::utils::time::ParsedTime;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;

/// Hold notice text for a queue slot, e.g. "Waiting in line. Position 2."
pub fn hold_notice_for(position: u32) -> String {
    format!("Waiting in line. Position {}.", position)
}

/// Extract the position number from a hold notice.
pub fn parse_position(notice: &str) -> Option<u32> {
    let re = Regex::new(r"Position\s+(\d+)").unwrap();
    re.captures(notice)?.get(1)?.as_str().parse().ok()
}

/// Number of students currently waiting for this category's lane.
pub fn waiting_count(category: Category, statuses: &BTreeMap<String, Status>) -> u32 {
    statuses
        .values()
        .filter(|s| matches!(s, Status::Waiting { category: c, .. } if *c == category))
        .count() as u32
}

/// Waiting students of a category as (name, position), front of the line
/// first.
pub fn queue_list(category: Category, statuses: &BTreeMap<String, Status>) -> Vec<(String, u32)> {
    let mut list: Vec<(String, u32)> = statuses
        .iter()
        .filter_map(|(name, s)| match s {
            Status::Waiting {
                category: c,
                position,
                ..
            } if *c == category => Some((name.clone(), *position)),
            _ => None,
        })
        .collect();
    list.sort_by_key(|(_, pos)| *pos);
    list
}

/// Append a queued-wait row for a student. The assigned position is one
/// past the current count of waiters for the category.
pub fn enqueue(
    pool: &mut DbPool,
    date: NaiveDate,
    student: &str,
    student_id: &str,
    category: Category,
    teacher: &str,
    statuses: &BTreeMap<String, Status>,
) -> AppResult<Status> {
    let position = waiting_count(category, statuses) + 1;
    let rec = Record::new_waiting(
        date,
        student,
        student_id,
        category,
        teacher,
        hold_notice_for(position),
    );
    queries::append_record(&pool.conn, &rec)?;

    Ok(Status::Waiting {
        category,
        teacher: teacher.to_string(),
        position,
    })
}

/// Promote a student's most recent same-day waiting row to a granted pass:
/// set `out_time`, clear the hold notice. If no waiting row exists (race
/// or manual sheet edit), fall back to appending a fresh out row.
pub fn promote_to_out(
    pool: &mut DbPool,
    records: &[Record],
    date: NaiveDate,
    student: &str,
    student_id: &str,
    category: Category,
    teacher: &str,
    now: ParsedTime,
) -> AppResult<Status> {
    let waiting_row = records
        .iter()
        .rev()
        .find(|r| r.student == student && r.is_waiting());

    match waiting_row {
        Some(row) => {
            queries::promote_row(&pool.conn, row.id, &now)?;
            Ok(Status::Out {
                category: row.category,
                out_time: now,
                teacher: row.teacher.clone(),
            })
        }
        None => {
            let rec = Record::new_out(date, student, student_id, category, teacher, now);
            queries::append_record(&pool.conn, &rec)?;
            Ok(Status::Out {
                category,
                out_time: now,
                teacher: teacher.to_string(),
            })
        }
    }
}

/// Rewrite the hold notices of a category's current waiters to a dense
/// 1..N sequence.
///
/// Ordering follows the previously embedded position numbers, NOT log
/// order: a waiter whose row was touched later must not lose their place
/// in line. Ties (and unparseable positions) keep scan order. Idempotent:
/// a notice that already carries the right text is not written.
///
/// Returns the number of rows actually rewritten.
pub fn recalculate_positions(
    pool: &mut DbPool,
    category: Category,
    date: &NaiveDate,
) -> AppResult<u32> {
    let records = queries::load_records_by_date(pool, date)?;

    // Latest row per student, in scan order.
    let mut latest: BTreeMap<String, &Record> = BTreeMap::new();
    let mut scan_order: Vec<String> = Vec::new();
    for rec in &records {
        if !latest.contains_key(&rec.student) {
            scan_order.push(rec.student.clone());
        }
        latest.insert(rec.student.clone(), rec);
    }

    // Current waiters of this category: (row id, embedded position, scan
    // position).
    let mut waiters: Vec<(i64, u32, usize, String)> = Vec::new();
    for (scan_pos, student) in scan_order.iter().enumerate() {
        let rec = latest[student];
        if rec.is_waiting() && rec.category == category {
            let embedded = parse_position(&rec.hold_notice).unwrap_or(u32::MAX);
            waiters.push((rec.id, embedded, scan_pos, rec.hold_notice.clone()));
        }
    }
    waiters.sort_by_key(|(_, embedded, scan_pos, _)| (*embedded, *scan_pos));

    let mut rewritten = 0;
    for (i, (row_id, _, _, old_notice)) in waiters.iter().enumerate() {
        let notice = hold_notice_for(i as u32 + 1);
        if *old_notice != notice {
            queries::rewrite_hold_notice(&pool.conn, *row_id, &notice)?;
            rewritten += 1;
        }
    }

    Ok(rewritten)
}
