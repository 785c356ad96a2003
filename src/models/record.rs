use super::category::Category;
use crate::utils::time::ParsedTime;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One row of the append-only pass log.
///
/// Invariants enforced at creation:
/// - `out_time` and `hold_notice` are mutually exclusive (a row is born as
///   a granted pass OR a queued wait, never both)
/// - `back_time` is only ever set on a row that already carries an
///   `out_time`, except the degraded back-only fallback row
///
/// Rows for past days are immutable; same-day rows may be mutated in place
/// (close a pass, promote a waiter, rewrite the position notice).
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: i64,
    pub date: NaiveDate,     // ⇔ pass_log.date (TEXT "YYYY-MM-DD")
    pub student: String,     // ⇔ pass_log.student
    pub student_id: String,  // ⇔ pass_log.student_id (roster external id)
    pub category: Category,  // ⇔ pass_log.category ('G' | 'B')
    pub teacher: String,     // ⇔ pass_log.teacher (approving adult)
    pub out_time: Option<ParsedTime>, // ⇔ pass_log.out_time (TEXT "H:MM AM/PM")
    pub back_time: Option<ParsedTime>, // ⇔ pass_log.back_time
    pub hold_notice: String, // ⇔ pass_log.hold_notice ("" when not queued)
    pub created_at: String,  // ⇔ pass_log.created_at (TEXT, ISO8601)
}

impl Record {
    /// A pass granted directly (lane was free).
    pub fn new_out(
        date: NaiveDate,
        student: &str,
        student_id: &str,
        category: Category,
        teacher: &str,
        out_time: ParsedTime,
    ) -> Self {
        Self {
            id: 0,
            date,
            student: student.to_string(),
            student_id: student_id.to_string(),
            category,
            teacher: teacher.to_string(),
            out_time: Some(out_time),
            back_time: None,
            hold_notice: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// A queued wait (lane occupied).
    pub fn new_waiting(
        date: NaiveDate,
        student: &str,
        student_id: &str,
        category: Category,
        teacher: &str,
        hold_notice: String,
    ) -> Self {
        Self {
            id: 0,
            date,
            student: student.to_string(),
            student_id: student_id.to_string(),
            category,
            teacher: teacher.to_string(),
            out_time: None,
            back_time: None,
            hold_notice,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Degraded fallback: a return with no matching open pass.
    pub fn new_back_only(
        date: NaiveDate,
        student: &str,
        student_id: &str,
        category: Category,
        teacher: &str,
        back_time: ParsedTime,
    ) -> Self {
        Self {
            id: 0,
            date,
            student: student.to_string(),
            student_id: student_id.to_string(),
            category,
            teacher: teacher.to_string(),
            out_time: None,
            back_time: Some(back_time),
            hold_notice: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Pass granted and not yet returned.
    pub fn is_open_out(&self) -> bool {
        self.out_time.is_some() && self.back_time.is_none()
    }

    /// Queued wait that was never promoted or resolved.
    pub fn is_waiting(&self) -> bool {
        !self.hold_notice.is_empty() && self.out_time.is_none() && self.back_time.is_none()
    }

    /// Completed trip (counts toward the per-period usage limit).
    pub fn is_closed_trip(&self) -> bool {
        self.out_time.is_some() && self.back_time.is_some()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn out_time_str(&self) -> String {
        self.out_time.map(|t| t.to_cell()).unwrap_or_default()
    }

    pub fn back_time_str(&self) -> String {
        self.back_time.map(|t| t.to_cell()).unwrap_or_default()
    }
}
