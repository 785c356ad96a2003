//! Status derivation: a pure reducer from today's log records to exactly
//! one status per student.

use crate::core::queue::parse_position;
use crate::models::record::Record;
use crate::models::status::Status;
use std::collections::BTreeMap;

/// Reduce a full-day scan (append order) into the current status of every
/// student that appears in it.
///
/// Last record wins: a student can cycle available → out → available →
/// waiting within one day and only the latest episode is reflected here.
/// Historical trip counts are deliberately NOT aggregated; that is the
/// usage-limit policy's job, which scans all of today's rows.
pub fn derive_statuses(records: &[Record]) -> BTreeMap<String, Status> {
    let mut statuses = BTreeMap::new();

    for rec in records {
        let status = status_of_record(rec);
        statuses.insert(rec.student.clone(), status);
    }

    statuses
}

fn status_of_record(rec: &Record) -> Status {
    if rec.back_time.is_some() {
        return Status::Available;
    }
    if let Some(out_time) = rec.out_time {
        return Status::Out {
            category: rec.category,
            out_time,
            teacher: rec.teacher.clone(),
        };
    }
    if !rec.hold_notice.is_empty() {
        return Status::Waiting {
            category: rec.category,
            teacher: rec.teacher.clone(),
            // unparseable position text is repaired by the next
            // recalculation pass
            position: parse_position(&rec.hold_notice).unwrap_or(0),
        };
    }
    Status::Available
}
