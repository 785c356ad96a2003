pub mod back;
pub mod check;
pub mod config;
pub mod init;
pub mod log;
pub mod out;
pub mod queue;
pub mod status;

use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::utils::time::parse_clock;
use chrono::NaiveTime;

/// Resolve the effective wall-clock time: the hidden `--at HH:MM`
/// override, or now.
pub(crate) fn clock(at: Option<&String>) -> AppResult<NaiveTime> {
    match at {
        Some(s) => parse_clock(s).ok_or_else(|| AppError::InvalidTime(s.clone())),
        None => Ok(chrono::Local::now().time()),
    }
}

pub(crate) fn parse_category(code: &str) -> AppResult<Category> {
    Category::from_code(code).ok_or_else(|| AppError::InvalidCategory(code.to_string()))
}
