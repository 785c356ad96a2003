//! Action processor: the single state-transition entry point.
//!
//! Every call re-derives the day's state from a fresh full scan: no
//! mutable state object is carried between calls, which keeps each
//! operation idempotent on retry at the cost of a linear scan (fine at
//! tens of students per day). The host model is one logical operation at
//! a time; the cooldown guard below only dampens double submissions from
//! an impatient caller and is not a correctness mechanism.

use crate::config::Config;
use crate::core::{gate, limit, queue, status};
use crate::db::audit::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::category::Category;
use crate::models::record::Record;
use crate::models::status::{Period, Status};
use crate::models::student::Student;
use crate::ui::messages;
use crate::utils::date;
use crate::utils::time::ParsedTime;
use chrono::{DateTime, Local, NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::fmt;

/// A structured business rejection. Not a fault: the log is untouched and
/// the reason is meant to be shown to the caller verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Validation(String),
    DoubleSubmission { seconds: i64 },
    LimitExceeded { reason: String, period: Period },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Validation(msg) => write!(f, "{}", msg),
            Rejection::DoubleSubmission { seconds } => {
                write!(f, "request ignored: duplicate submission within {}s", seconds)
            }
            Rejection::LimitExceeded { reason, .. } => write!(f, "{}", reason),
        }
    }
}

pub type ActionOutcome = Result<Status, Rejection>;

/// Handle a pass request for `student`.
///
/// Transition table (current status → effect):
/// - `Waiting`  → promote the waiting row to a grant, then recalculate
///   positions (a teacher explicitly granting the next in line)
/// - `Available`, limit blocks → rejection, nothing written
/// - `Available`, lane occupied → enqueue at the back of the line
/// - `Available`, lane free → append a granted pass row
pub fn request_access(
    pool: &mut DbPool,
    cfg: &Config,
    roster: &[Student],
    student: &str,
    category: Category,
    teacher: &str,
    now: NaiveTime,
) -> AppResult<ActionOutcome> {
    let student = student.trim();
    let teacher = teacher.trim();
    if student.is_empty() {
        return Ok(Err(Rejection::Validation("student name is required".into())));
    }
    if teacher.is_empty() {
        return Ok(Err(Rejection::Validation("teacher name is required".into())));
    }

    let today = date::today();
    let records = queries::load_records_by_date(pool, &today)?;

    if let Some(rejection) = double_submission(&records, student, cfg) {
        return Ok(Err(rejection));
    }

    let statuses = status::derive_statuses(&records);
    let student_id = resolve_student_id(roster, &records, student);

    // Re-request while queued: the teacher is granting this student their
    // turn. No gate or limit check; the grant is an explicit human action.
    if statuses.get(student).is_some_and(|s| s.is_waiting()) {
        let st = queue::promote_to_out(
            pool,
            &records,
            today,
            student,
            &student_id,
            category,
            teacher,
            ParsedTime::from_naive(now),
        )?;
        // recalculate the lane the student was actually queued in, which
        // wins over the flag the teacher typed
        let lane = match &st {
            Status::Out { category: c, .. } => *c,
            _ => category,
        };
        queue::recalculate_positions(pool, lane, &today)?;
        log_audit(pool, "promote", student, "waiting row promoted to out");
        return Ok(Ok(st));
    }

    let check = limit::check_limit(student, &records, now.hour(), cfg);
    if !check.allowed {
        return Ok(Err(Rejection::LimitExceeded {
            reason: check.reason.unwrap_or_else(|| "usage limit reached".into()),
            period: check.period,
        }));
    }

    if gate::is_occupied(category, &statuses) {
        let st = queue::enqueue(pool, today, student, &student_id, category, teacher, &statuses)?;
        if let Status::Waiting { position, .. } = st {
            log_audit(
                pool,
                "queue",
                student,
                &format!("queued for {} lane at position {}", category.label(), position),
            );
        }
        Ok(Ok(st))
    } else {
        let out_time = ParsedTime::from_naive(now);
        let rec = Record::new_out(today, student, &student_id, category, teacher, out_time);
        queries::append_record(&pool.conn, &rec)?;
        log_audit(
            pool,
            "out",
            student,
            &format!("granted {} lane at {}", category.label(), out_time.to_cell()),
        );
        Ok(Ok(Status::Out {
            category,
            out_time,
            teacher: teacher.to_string(),
        }))
    }
}

/// Handle a return for `student`: close the most recent open pass with a
/// back time, then recalculate the category's queue positions so the
/// labels stay dense (nobody is auto-promoted into the freed lane).
///
/// When no open pass exists, a back-only row is appended as a degraded
/// fallback, but only if the category can be determined from the flag or
/// from one of today's rows; otherwise the return is rejected.
pub fn return_access(
    pool: &mut DbPool,
    cfg: &Config,
    roster: &[Student],
    student: &str,
    teacher: &str,
    category: Option<Category>,
    now: NaiveTime,
) -> AppResult<ActionOutcome> {
    let student = student.trim();
    let teacher = teacher.trim();
    if student.is_empty() {
        return Ok(Err(Rejection::Validation("student name is required".into())));
    }
    if teacher.is_empty() {
        return Ok(Err(Rejection::Validation("teacher name is required".into())));
    }

    let today = date::today();
    let records = queries::load_records_by_date(pool, &today)?;
    let back_time = ParsedTime::from_naive(now);

    let open = records
        .iter()
        .rev()
        .find(|r| r.student == student && r.is_open_out());

    let lane = match open {
        Some(row) => {
            queries::set_back_time(&pool.conn, row.id, &back_time)?;
            row.category
        }
        None => {
            let known = category.or_else(|| {
                records
                    .iter()
                    .rev()
                    .find(|r| r.student == student)
                    .map(|r| r.category)
            });
            match known {
                Some(cat) => {
                    let student_id = resolve_student_id(roster, &records, student);
                    let rec = Record::new_back_only(
                        today, student, &student_id, cat, teacher, back_time,
                    );
                    queries::append_record(&pool.conn, &rec)?;
                    cat
                }
                None => {
                    return Ok(Err(Rejection::Validation(format!(
                        "no open pass for {} today",
                        student
                    ))));
                }
            }
        }
    };

    queue::recalculate_positions(pool, lane, &today)?;
    log_audit(
        pool,
        "back",
        student,
        &format!("returned at {}", back_time.to_cell()),
    );

    Ok(Ok(Status::Available))
}

/// Read-only: full-day scan + derivation.
pub fn statuses(pool: &mut DbPool) -> AppResult<BTreeMap<String, Status>> {
    let today = date::today();
    let records = queries::load_records_by_date(pool, &today)?;
    Ok(status::derive_statuses(&records))
}

/// Read-only: usage-limit check for one student at the given hour.
pub fn check_usage(
    pool: &mut DbPool,
    cfg: &Config,
    student: &str,
    now: NaiveTime,
) -> AppResult<limit::LimitCheck> {
    let today = date::today();
    let records = queries::load_records_by_date(pool, &today)?;
    Ok(limit::check_limit(student, &records, now.hour(), cfg))
}

/// Advisory guard against double submission from a slow or impatient
/// caller: reject a request arriving within the cooldown window of the
/// student's latest row.
fn double_submission(records: &[Record], student: &str, cfg: &Config) -> Option<Rejection> {
    if cfg.cooldown_secs <= 0 {
        return None;
    }
    let last = records.iter().rev().find(|r| r.student == student)?;
    let created = DateTime::parse_from_rfc3339(&last.created_at).ok()?;
    let elapsed = Local::now()
        .signed_duration_since(created.with_timezone(&Local))
        .num_seconds();
    if (0..cfg.cooldown_secs).contains(&elapsed) {
        return Some(Rejection::DoubleSubmission {
            seconds: cfg.cooldown_secs,
        });
    }
    None
}

/// The student's external id: roster first, then any id recorded earlier
/// today, else empty (the id is an opaque passthrough field).
fn resolve_student_id(roster: &[Student], records: &[Record], student: &str) -> String {
    if let Some(s) = roster.iter().find(|s| s.name == student) {
        if !s.id.is_empty() {
            return s.id.clone();
        }
    }
    records
        .iter()
        .rev()
        .find(|r| r.student == student && !r.student_id.is_empty())
        .map(|r| r.student_id.clone())
        .unwrap_or_default()
}

fn log_audit(pool: &DbPool, operation: &str, target: &str, message: &str) {
    if let Err(e) = audit(&pool.conn, operation, target, message) {
        messages::warning(format!("failed to write audit row: {}", e));
    }
}
