use crate::cli::commands::clock;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

/// Check the usage-limit policy for one student at the current (or
/// overridden) time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check { student, at, json } = cmd {
        let now = clock(at.as_ref())?;
        let mut pool = DbPool::new(&cfg.database)?;

        let check = actions::check_usage(&mut pool, cfg, student, now)?;

        if *json {
            println!("{}", serde_json::to_string(&check).unwrap_or_default());
        } else if check.allowed {
            messages::success(format!(
                "{} may request a pass this {}",
                student,
                check.period.label()
            ));
        } else {
            messages::warning(check.reason.unwrap_or_else(|| "not allowed".into()));
        }
    }

    Ok(())
}
