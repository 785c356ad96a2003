//! Roster provider: a read-only CSV file with `name,id` columns.
//!
//! The roster is external and refreshed out of band (daily export from
//! the student information system); this module only reads it. A missing
//! path degrades to an empty roster so the log alone still drives status
//! listings.

use crate::errors::AppResult;
use crate::models::student::Student;
use std::path::Path;

pub fn load(path: &str) -> AppResult<Vec<Student>> {
    if path.trim().is_empty() || !Path::new(path).exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut students = Vec::new();
    for result in reader.deserialize() {
        let student: Student = result?;
        if !student.name.is_empty() {
            students.push(student);
        }
    }
    Ok(students)
}
