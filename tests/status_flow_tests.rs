use predicates::str::contains;

mod common;
use common::{hp, init_db, setup_test_db, write_roster};

#[test]
fn test_round_trip_out_and_back() {
    let db_path = setup_test_db("round_trip");
    init_db(&db_path);

    // Lane free: the pass is granted directly
    hp().args([
        "--db",
        &db_path,
        "--cooldown",
        "0",
        "out",
        "Uma Torres",
        "G",
        "--teacher",
        "Ms. Rivera",
    ])
    .assert()
    .success()
    .stdout(contains("Uma Torres is out"));

    hp().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("OUT"));

    // Return closes the same row; no waiting artifact anywhere
    hp().args([
        "--db",
        &db_path,
        "--cooldown",
        "0",
        "back",
        "Uma Torres",
        "--teacher",
        "Ms. Rivera",
    ])
    .assert()
    .success()
    .stdout(contains("Uma Torres is back"));

    let output = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AVAILABLE"));
    assert!(!stdout.contains("WAITING"));
    assert!(!stdout.contains("OUT"));
}

#[test]
fn test_second_request_joins_waiting_line() {
    let db_path = setup_test_db("waiting_line");
    init_db(&db_path);

    hp().args([
        "--db",
        &db_path,
        "--cooldown",
        "0",
        "out",
        "Alice",
        "G",
        "--teacher",
        "Mr. Lee",
    ])
    .assert()
    .success();

    // Girls lane occupied: Bella is queued, not granted
    hp().args([
        "--db",
        &db_path,
        "--cooldown",
        "0",
        "out",
        "Bella",
        "G",
        "--teacher",
        "Mr. Lee",
    ])
    .assert()
    .success()
    .stdout(contains("Position 1."));

    hp().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("WAITING"));
}

#[test]
fn test_no_auto_promotion_on_return() {
    let db_path = setup_test_db("no_auto_promotion");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Bella", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success();

    hp().args([
        "--db", &db_path, "--cooldown", "0", "back", "Alice", "-t", "Mr. Lee",
    ])
    .assert()
    .success();

    // Bella stays in line until a teacher explicitly grants her turn
    hp().args(["--db", &db_path, "queue", "--category", "G"])
        .assert()
        .success()
        .stdout(contains("1. Bella"));

    let output = hp()
        .args(["--db", &db_path, "status"])
        .output()
        .expect("status");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("WAITING"));
    assert!(!stdout.contains("OUT"));
}

#[test]
fn test_grant_from_waiting_line() {
    let db_path = setup_test_db("grant_from_queue");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Bella", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success();
    hp().args([
        "--db", &db_path, "--cooldown", "0", "back", "Alice", "-t", "Mr. Lee",
    ])
    .assert()
    .success();

    // Re-request while waiting = the teacher grants Bella her turn
    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Bella", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success()
    .stdout(contains("Bella is out"));

    hp().args(["--db", &db_path, "queue", "--category", "G"])
        .assert()
        .success()
        .stdout(contains("(0 waiting)"));
}

#[test]
fn test_roster_lists_everyone_available() {
    let db_path = setup_test_db("roster_available");
    let roster = write_roster("roster_available", &[("Alice", "1001"), ("Bella", "1002")]);
    init_db(&db_path);

    let output = hp()
        .args(["--db", &db_path, "--roster", &roster, "status"])
        .output()
        .expect("status");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Alice"));
    assert!(stdout.contains("Bella"));
    assert_eq!(stdout.matches("AVAILABLE").count(), 2);
}

#[test]
fn test_blank_student_is_rejected() {
    let db_path = setup_test_db("blank_student");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "  ", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success()
    .stdout(contains("request rejected"))
    .stdout(contains("student name is required"));
}

#[test]
fn test_double_submission_guard() {
    let db_path = setup_test_db("double_submission");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "300", "out", "Alice", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success()
    .stdout(contains("Alice is out"));

    // Second click within the cooldown window is dampened, not queued
    hp().args([
        "--db", &db_path, "--cooldown", "300", "out", "Alice", "G", "-t", "Mr. Lee",
    ])
    .assert()
    .success()
    .stdout(contains("duplicate submission"));
}

#[test]
fn test_status_json_output() {
    let db_path = setup_test_db("status_json");
    init_db(&db_path);

    hp().args([
        "--db", &db_path, "--cooldown", "0", "out", "Alice", "B", "-t", "Mr. Lee",
    ])
    .assert()
    .success();

    hp().args(["--db", &db_path, "status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"state\": \"Out\""))
        .stdout(contains("\"category\": \"Boys\""));
}
