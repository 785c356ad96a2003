use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};

/// Print raw pass-log rows (no refinement: what external audits see).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, date } = cmd {
        let day = match date {
            Some(s) => Some(parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let rows = queries::dump_rows(&mut pool, day.as_ref())?;

        let mut table = Table::new(vec![
            Column::new("ID", 4),
            Column::new("DATE", 10),
            Column::new("STUDENT", 16),
            Column::new("SID", 6),
            Column::new("CAT", 3),
            Column::new("OUT", 8),
            Column::new("BACK", 8),
            Column::new("HOLD NOTICE", 20),
        ]);

        for (id, date, student, sid, cat, out, back, notice) in rows {
            table.add_row(vec![
                id.to_string(),
                date,
                student,
                sid,
                cat,
                out,
                back,
                notice,
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
