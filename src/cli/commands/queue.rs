use crate::cli::commands::parse_category;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{actions, queue};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::category::Category;

/// Show the waiting lines, front of the line first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Queue { category } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let statuses = actions::statuses(&mut pool)?;

        let lanes: Vec<Category> = match category {
            Some(code) => vec![parse_category(code)?],
            None => vec![Category::Girls, Category::Boys],
        };

        for lane in lanes {
            let list = queue::queue_list(lane, &statuses);
            println!("{} line ({} waiting):", lane.label(), list.len());
            for (name, position) in &list {
                println!("  {}. {}", position, name);
            }
        }
    }

    Ok(())
}
