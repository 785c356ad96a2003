//! Per-period usage-limit policy: one completed trip per student per
//! morning/afternoon.

use crate::config::Config;
use crate::models::record::Record;
use crate::models::status::Period;
use serde::Serialize;

/// Outcome of a usage-limit check. `reason` is human-readable and meant
/// to be rendered verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct LimitCheck {
    pub allowed: bool,
    pub reason: Option<String>,
    pub period: Period,
}

/// Decide whether a student may request a pass right now.
///
/// Scans ALL of today's records for the student, not just the latest:
/// - an open pass blocks regardless of period ("currently out")
/// - otherwise, completed trips whose out hour falls in the current
///   period are counted against `max_trips_per_period`
///
/// A queued wait carries no out time and never counts toward the limit.
pub fn check_limit(student: &str, records: &[Record], now_hour: u32, cfg: &Config) -> LimitCheck {
    let period = Period::from_hour(now_hour, cfg.cutoff_hour);

    let mine = records.iter().filter(|r| r.student == student);

    let mut closed_in_period = 0u32;
    for rec in mine {
        if rec.is_open_out() {
            return LimitCheck {
                allowed: false,
                reason: Some(format!("{} is currently out", student)),
                period,
            };
        }
        if rec.is_closed_trip() {
            let trip_hour = rec.out_time.map(|t| t.hour()).unwrap_or(0);
            if Period::from_hour(trip_hour, cfg.cutoff_hour) == period {
                closed_in_period += 1;
            }
        }
    }

    if closed_in_period >= cfg.max_trips_per_period {
        return LimitCheck {
            allowed: false,
            reason: Some(format!(
                "{} already used the restroom this {}",
                student,
                period.label()
            )),
            period,
        };
    }

    LimitCheck {
        allowed: true,
        reason: None,
        period,
    }
}
