//! Unified application error type.
//! All modules (db, core, cli, roster) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Business rejections (limit exceeded, duplicate submission, bad input)
//! are NOT errors: they travel as values (see core::actions::Rejection) so
//! the caller can render the reason verbatim. AppError is reserved for the
//! cases where no derivation is possible at all (store unreachable, broken
//! config, unreadable roster).

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Log store
    // ---------------------------
    #[error("Log store error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Log store migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid category code '{0}' (use 'G' or 'B')")]
    InvalidCategory(String),

    // ---------------------------
    // Roster
    // ---------------------------
    #[error("Roster error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster file not readable: {0}")]
    Roster(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
