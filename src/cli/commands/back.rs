use crate::cli::commands::{clock, parse_category};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::roster;
use crate::ui::messages;

/// Mark a student back (return a pass).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Back {
        student,
        teacher,
        category,
        at,
    } = cmd
    {
        let category = match category {
            Some(code) => Some(parse_category(code)?),
            None => None,
        };
        let now = clock(at.as_ref())?;
        let students = roster::load(&cfg.roster)?;

        let mut pool = DbPool::new(&cfg.database)?;

        match actions::return_access(&mut pool, cfg, &students, student, teacher, category, now)? {
            Ok(_) => {
                messages::success(format!("{} is back at {}", student, now.format("%H:%M")));
            }
            Err(rejection) => {
                messages::warning(format!("return rejected: {}", rejection));
            }
        }
    }

    Ok(())
}
