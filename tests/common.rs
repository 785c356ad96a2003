#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn hp() -> Command {
    cargo_bin_cmd!("hallpass")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hallpass.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write a roster CSV inside the temp dir and return its path
pub fn write_roster(name: &str, rows: &[(&str, &str)]) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_roster.csv", name));
    let mut content = String::from("name,id\n");
    for (student, id) in rows {
        content.push_str(&format!("{},{}\n", student, id));
    }
    fs::write(&path, content).expect("write roster csv");
    path.to_string_lossy().to_string()
}

/// Initialize the database schema (test mode: no config file update)
pub fn init_db(db_path: &str) {
    hp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Today's date as stored in the log ("YYYY-MM-DD")
pub fn today_str() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
