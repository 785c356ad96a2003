use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::roster;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::table::{Column, Table};

/// Show every student's current status: the roster joined with today's
/// derived statuses, plus any student who appears only in the log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let statuses = actions::statuses(&mut pool)?;
        let students = roster::load(&cfg.roster)?;

        // roster order first, then log-only students (BTreeMap order)
        let mut names: Vec<String> = students.iter().map(|s| s.name.clone()).collect();
        for name in statuses.keys() {
            if !names.iter().any(|n| n == name) {
                names.push(name.clone());
            }
        }

        if *json {
            let full: std::collections::BTreeMap<&str, Status> = names
                .iter()
                .map(|n| {
                    (
                        n.as_str(),
                        statuses.get(n).cloned().unwrap_or(Status::Available),
                    )
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&full).unwrap_or_default());
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("NAME", 16),
            Column::new("STATUS", 9),
            Column::new("LANE", 5),
            Column::new("DETAIL", 12),
            Column::new("TEACHER", 10),
        ]);

        for name in &names {
            let status = statuses.get(name).cloned().unwrap_or(Status::Available);
            let (lane, teacher) = match &status {
                Status::Available => (String::new(), String::new()),
                Status::Out {
                    category, teacher, ..
                }
                | Status::Waiting {
                    category, teacher, ..
                } => (category.label().to_string(), teacher.clone()),
            };
            let cell = status.cell();
            table.add_row(vec![
                name.clone(),
                format!("{}{}{}", color_for_status(cell), cell, RESET),
                lane,
                status.detail(),
                teacher,
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
