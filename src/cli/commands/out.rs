use crate::cli::commands::{clock, parse_category};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::roster;
use crate::ui::messages;

/// Mark a student out (request a pass).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Out {
        student,
        category,
        teacher,
        at,
    } = cmd
    {
        let category = parse_category(category)?;
        let now = clock(at.as_ref())?;
        let students = roster::load(&cfg.roster)?;

        let mut pool = DbPool::new(&cfg.database)?;

        match actions::request_access(&mut pool, cfg, &students, student, category, teacher, now)? {
            Ok(Status::Out { out_time, .. }) => {
                messages::success(format!(
                    "{} is out ({} lane) at {}",
                    student,
                    category.label(),
                    out_time.to_cell()
                ));
            }
            Ok(Status::Waiting { position, .. }) => {
                messages::info(format!(
                    "{} lane is occupied. {} added to the waiting line. Position {}.",
                    category.label(),
                    student,
                    position
                ));
            }
            Ok(Status::Available) => {
                // not produced by request_access; kept for completeness
                messages::info(format!("{} is available", student));
            }
            Err(rejection) => {
                messages::warning(format!("request rejected: {}", rejection));
            }
        }
    }

    Ok(())
}
