//! Time cell normalization.
//!
//! The log sheet historically accumulated three representations for the
//! same wall-clock moment: "H:MM AM/PM" (the format we write), plain
//! 24-hour "HH:MM", and full ISO-8601 datetimes pasted in by hand. All of
//! them are funneled through [`ParsedTime`] at the read boundary so that
//! downstream logic never branches on representation.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use serde::{Serialize, Serializer};

/// A normalized time-of-day value, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime(NaiveTime);

impl ParsedTime {
    pub fn from_naive(t: NaiveTime) -> Self {
        // seconds are not representable in the cell format
        Self(t.with_second(0).unwrap_or(t))
    }

    /// Parse a raw cell value. Returns None for an empty cell or a value
    /// that matches none of the accepted formats.
    pub fn from_cell(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        // ISO-8601 datetime ("2025-03-14T09:30:00", optional trailing zone)
        if let Some(prefix) = s.get(..19) {
            if let Ok(dt) = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M:%S") {
                return Some(Self::from_naive(dt.time()));
            }
        }

        // "H:MM AM/PM"
        let re = Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])$").unwrap();
        if let Some(caps) = re.captures(s) {
            let mut h: u32 = caps[1].parse().ok()?;
            let m: u32 = caps[2].parse().ok()?;
            if !(1..=12).contains(&h) || m > 59 {
                return None;
            }
            let pm = caps[3].eq_ignore_ascii_case("pm");
            if pm && h != 12 {
                h += 12;
            } else if !pm && h == 12 {
                h = 0;
            }
            return NaiveTime::from_hms_opt(h, m, 0).map(Self);
        }

        // 24-hour "HH:MM"
        NaiveTime::parse_from_str(s, "%H:%M").ok().map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Format back to the cell representation, e.g. "9:05 AM", "2:30 PM".
    pub fn to_cell(&self) -> String {
        let h24 = self.0.hour();
        let ampm = if h24 >= 12 { "PM" } else { "AM" };
        let mut h = h24 % 12;
        if h == 0 {
            h = 12;
        }
        format!("{}:{:02} {}", h, self.0.minute(), ampm)
    }
}

impl Serialize for ParsedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_cell())
    }
}

/// Parse a user-supplied "HH:MM" string (CLI `--at` override).
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}
