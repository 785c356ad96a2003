//! Mutual-exclusion gate: occupancy is fully recoverable from derived
//! statuses, so no separate lock object exists (and none can leak).

use crate::models::category::Category;
use crate::models::status::Status;
use std::collections::BTreeMap;

/// True iff some student currently holds the lane of this category.
pub fn is_occupied(category: Category, statuses: &BTreeMap<String, Status>) -> bool {
    statuses
        .values()
        .any(|s| matches!(s, Status::Out { category: c, .. } if *c == category))
}
