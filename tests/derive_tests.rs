use predicates::str::contains;

mod common;
use common::{hp, init_db, setup_test_db, today_str, write_roster};

fn insert_raw_row(
    db_path: &str,
    date: &str,
    student: &str,
    category: &str,
    out_time: &str,
    back_time: &str,
    hold_notice: &str,
) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.execute(
        "INSERT INTO pass_log (date, student, student_id, category, teacher, out_time, back_time, hold_notice, created_at)
         VALUES (?1, ?2, '', ?3, 'Ms. Cho', ?4, ?5, ?6, '')",
        rusqlite::params![date, student, category, out_time, back_time, hold_notice],
    )
    .expect("insert raw row");
}

#[test]
fn test_corrupt_date_row_is_excluded_from_today() {
    let db_path = setup_test_db("corrupt_date");
    let roster = write_roster("corrupt_date", &[("Alice", "1001"), ("Umar", "1004")]);
    init_db(&db_path);

    // Umar's row has a garbage date: it must not leak into today's
    // derivation, and everyone else still computes correctly
    insert_raw_row(&db_path, "not-a-date", "Umar", "B", "9:00 AM", "", "");

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Ms. Cho",
    ])
    .assert()
    .success();

    let output = hp()
        .args(["--db", &db_path, "--roster", &roster, "status"])
        .output()
        .expect("status");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(stdout.matches("OUT").count(), 1);
    assert!(stdout.contains("Umar"));
    assert!(stdout.contains("AVAILABLE"));
}

#[test]
fn test_malformed_time_row_is_skipped_with_warning() {
    let db_path = setup_test_db("malformed_time");
    init_db(&db_path);

    let today = today_str();
    insert_raw_row(&db_path, &today, "Wren", "G", "garbage", "", "");

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Ms. Cho",
    ])
    .assert()
    .success()
    .stdout(contains("skipping malformed log row"));

    // Wren's broken row blinds nobody: Alice was granted the lane
    let output = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("OUT").count(), 1);
    assert!(stdout.contains("Alice"));
}

#[test]
fn test_at_most_one_out_per_category() {
    let db_path = setup_test_db("exclusivity");
    init_db(&db_path);

    for student in ["Alice", "Bella", "Cara"] {
        hp().args([
            "--db", &db_path, "--cooldown", "0", "out", student, "G", "-t", "Ms. Cho",
        ])
        .assert()
        .success();
    }
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Bob", "B", "-t", "Ms. Cho",
    ])
    .assert()
    .success();

    // One occupant per lane, everyone else waits
    let output = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("OUT").count(), 2);
    assert_eq!(stdout.matches("WAITING").count(), 2);
}

#[test]
fn test_derivation_is_idempotent() {
    let db_path = setup_test_db("idempotent");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Ms. Cho",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Bella", "G", "-t", "Ms. Cho",
    ])
    .assert()
    .success();

    let first = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    let second = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_last_record_wins_within_a_day() {
    let db_path = setup_test_db("last_record_wins");
    init_db(&db_path);

    // Alice cycles out → back → queued; only the latest episode shows
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Ms. Cho", "--at", "09:00",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "back", "Alice", "-t", "Ms. Cho", "--at", "09:05",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Bella", "G", "-t", "Ms. Cho", "--at", "13:00",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Ms. Cho", "--at", "13:10",
    ])
    .assert()
    .success()
    .stdout(contains("Position 1."));

    let output = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("WAITING"));
    assert_eq!(stdout.matches("OUT").count(), 1);
}

#[test]
fn test_back_with_no_record_and_no_category_is_rejected() {
    let db_path = setup_test_db("back_unknown");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "back", "Ghost", "-t", "Ms. Cho",
    ])
    .assert()
    .success()
    .stdout(contains("return rejected"))
    .stdout(contains("no open pass"));
}

#[test]
fn test_back_fallback_creates_back_only_row() {
    let db_path = setup_test_db("back_fallback");
    init_db(&db_path);

    hp().args([
        "--db",
        &db_path,
        "--cooldown",
        "0",
        "back",
        "Ghost",
        "-t",
        "Ms. Cho",
        "--category",
        "G",
        "--at",
        "10:15",
    ])
    .assert()
    .success();

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let (out_time, back_time): (String, String) = conn
        .query_row(
            "SELECT out_time, back_time FROM pass_log WHERE student = 'Ghost'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("row");
    assert_eq!(out_time, "");
    assert_eq!(back_time, "10:15 AM");
}

#[test]
fn test_log_print_shows_raw_rows() {
    let db_path = setup_test_db("log_print");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Ms. Cho", "--at", "09:05",
    ])
    .assert()
    .success();

    hp().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("9:05 AM"))
        .stdout(contains(today_str()));
}
