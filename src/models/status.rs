use super::category::Category;
use crate::utils::time::ParsedTime;
use serde::Serialize;

/// Derived per-student status, recomputed from a full-day scan on every
/// operation. Exactly one variant holds per student at any instant; it is
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state")]
pub enum Status {
    Available,
    Out {
        category: Category,
        out_time: ParsedTime,
        teacher: String,
    },
    Waiting {
        category: Category,
        teacher: String,
        position: u32,
    },
}

impl Status {
    pub fn is_out(&self) -> bool {
        matches!(self, Status::Out { .. })
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, Status::Waiting { .. })
    }

    /// Short table cell, e.g. "AVAILABLE" / "OUT" / "WAITING".
    pub fn cell(&self) -> &'static str {
        match self {
            Status::Available => "AVAILABLE",
            Status::Out { .. } => "OUT",
            Status::Waiting { .. } => "WAITING",
        }
    }

    /// Detail table cell, e.g. "out 9:05 AM" or "Position 2".
    pub fn detail(&self) -> String {
        match self {
            Status::Available => String::new(),
            Status::Out { out_time, .. } => format!("out {}", out_time.to_cell()),
            Status::Waiting { position, .. } => format!("Position {}", position),
        }
    }
}

/// Morning/afternoon bucket used by the usage-limit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    pub fn from_hour(hour: u32, cutoff_hour: u32) -> Self {
        if hour < cutoff_hour {
            Period::Morning
        } else {
            Period::Afternoon
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
        }
    }
}
