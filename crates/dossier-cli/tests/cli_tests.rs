use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary directory holding the database of one test
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with --no-color and the test database already set
fn dossier_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("dossier").expect("Failed to find dossier binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Creates folder 1 and `titles.len()` SVP records in it, IDs 1..
fn seed_folder(temp_dir: &TempDir, titles: &[&str]) {
    dossier_cmd(temp_dir)
        .args(["folder", "create", "Supplies 2024", "--drawer", "2", "--cabinet", "A"])
        .assert()
        .success();

    for title in titles {
        dossier_cmd(temp_dir)
            .args(["record", "create", "1", title])
            .assert()
            .success();
    }
}

#[test]
fn test_cli_default_shows_empty_dashboard() {
    let temp_dir = create_cli_test_environment();

    dossier_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dashboard"))
        .stdout(predicate::str::contains("No records yet."));
}

#[test]
fn test_cli_create_and_list_folders() {
    let temp_dir = create_cli_test_environment();

    dossier_cmd(&temp_dir)
        .args(["folder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No folders found."));

    dossier_cmd(&temp_dir)
        .args(["folder", "create", "Infrastructure", "--cabinet", "B", "--box", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created folder with ID: 1"))
        .stdout(predicate::str::contains("Infrastructure"));

    dossier_cmd(&temp_dir)
        .args(["f", "ls", "--cabinet", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Infrastructure (ID: 1)"));
}

#[test]
fn test_cli_create_record_with_type() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &[]);

    dossier_cmd(&temp_dir)
        .args([
            "record",
            "create",
            "1",
            "Road repair",
            "--reference",
            "PR-2024-015",
            "--type",
            "regular-bidding",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created record with ID: 1"))
        .stdout(predicate::str::contains("Regular Bidding"))
        .stdout(predicate::str::contains("PR-2024-015"));
}

#[test]
fn test_cli_create_record_in_missing_folder_fails() {
    let temp_dir = create_cli_test_environment();

    dossier_cmd(&temp_dir)
        .args(["record", "create", "9", "Orphan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Folder with ID 9 not found"));
}

#[test]
fn test_cli_folder_stack_numbers_records() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops", "Printer ink", "Chairs"]);

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Laptops (ID: 1)"))
        .stdout(predicate::str::contains("2. Printer ink (ID: 2)"))
        .stdout(predicate::str::contains("3. Chairs (ID: 3)"));
}

#[test]
fn test_cli_borrow_renumbers_and_return_restores() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops", "Printer ink", "Chairs"]);

    dossier_cmd(&temp_dir)
        .args(["record", "borrow", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Borrowed"));

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Printer ink (ID: 2)"))
        .stdout(predicate::str::contains("2. Chairs (ID: 3)"))
        .stdout(predicate::str::contains("Laptops (ID: 1) ⇢ Borrowed"));

    dossier_cmd(&temp_dir)
        .args(["record", "list", "--status", "borrowed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Laptops"))
        .stdout(predicate::str::contains("Chairs").not());

    dossier_cmd(&temp_dir)
        .args(["record", "return", "1"])
        .assert()
        .success();

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Laptops (ID: 1)"));
}

#[test]
fn test_cli_borrow_twice_fails() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops"]);

    dossier_cmd(&temp_dir)
        .args(["record", "borrow", "1"])
        .assert()
        .success();

    dossier_cmd(&temp_dir)
        .args(["record", "borrow", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to borrow record"));
}

#[test]
fn test_cli_relocate_record() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops", "Printer ink", "Chairs"]);

    dossier_cmd(&temp_dir)
        .args(["record", "relocate", "3", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved within the folder stack"));

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Chairs (ID: 3)"))
        .stdout(predicate::str::contains("2. Laptops (ID: 1)"))
        .stdout(predicate::str::contains("3. Printer ink (ID: 2)"));
}

#[test]
fn test_cli_relocate_without_position_is_noop() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops", "Printer ink"]);

    dossier_cmd(&temp_dir)
        .args(["record", "relocate", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: No target position given"));

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Printer ink (ID: 2)"));
}

#[test]
fn test_cli_move_record_between_folders() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops", "Printer ink"]);

    dossier_cmd(&temp_dir)
        .args(["folder", "create", "Archive 2023"])
        .assert()
        .success();

    dossier_cmd(&temp_dir)
        .args(["record", "move", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filed into folder 2"));

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Printer ink (ID: 2)"));

    dossier_cmd(&temp_dir)
        .args(["folder", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Laptops (ID: 1)"));
}

#[test]
fn test_cli_steps_follow_sequence() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops"]);

    dossier_cmd(&temp_dir)
        .args(["step", "set", "1", "publishedDate", "--date", "2024-05-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"))
        .stderr(predicate::str::contains("receivedPrDate"));

    dossier_cmd(&temp_dir)
        .args(["step", "set", "1", "receivedPrDate", "--date", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Received PR for Action"))
        .stdout(predicate::str::contains("2024-05-01"))
        .stdout(predicate::str::contains("➤ PR Deliberated"));

    dossier_cmd(&temp_dir)
        .args(["step", "set", "1", "prDeliberatedDate", "--date", "2024-05-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("29%"));

    dossier_cmd(&temp_dir)
        .args(["step", "next", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published (PhilGEPS)"));
}

#[test]
fn test_cli_step_set_rejects_bad_date() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops"]);

    dossier_cmd(&temp_dir)
        .args(["step", "set", "1", "receivedPrDate", "--date", "05/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_cli_step_clear_cascades() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops"]);

    for (key, date) in [
        ("receivedPrDate", "2024-05-01"),
        ("prDeliberatedDate", "2024-05-02"),
        ("publishedDate", "2024-05-03"),
    ] {
        dossier_cmd(&temp_dir)
            .args(["step", "set", "1", key, "--date", date])
            .assert()
            .success();
    }

    dossier_cmd(&temp_dir)
        .args(["step", "clear", "1", "prDeliberatedDate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 step date(s) on record 1"))
        .stdout(predicate::str::contains("- publishedDate"));

    dossier_cmd(&temp_dir)
        .args(["step", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Received PR for Action"))
        .stdout(predicate::str::contains("➤ PR Deliberated"))
        .stdout(predicate::str::contains("○ Published (PhilGEPS)"));
}

#[test]
fn test_cli_delete_folder_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &[]);

    dossier_cmd(&temp_dir)
        .args(["folder", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmation"));

    dossier_cmd(&temp_dir)
        .args(["folder", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted folder 'Supplies 2024' (ID: 1)"));
}

#[test]
fn test_cli_delete_non_empty_folder_fails() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops"]);

    dossier_cmd(&temp_dir)
        .args(["folder", "delete", "1", "--confirm"])
        .assert()
        .failure();

    dossier_cmd(&temp_dir)
        .args(["record", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted record 'Laptops' (ID: 1)"));

    dossier_cmd(&temp_dir)
        .args(["folder", "delete", "1", "--confirm"])
        .assert()
        .success();
}

#[test]
fn test_cli_dashboard_counts() {
    let temp_dir = create_cli_test_environment();
    seed_folder(&temp_dir, &["Laptops", "Printer ink"]);

    dossier_cmd(&temp_dir)
        .args(["record", "borrow", "2"])
        .assert()
        .success();

    dossier_cmd(&temp_dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Records**: 2"))
        .stdout(predicate::str::contains("**Archived**: 1"))
        .stdout(predicate::str::contains("**Borrowed**: 1"));
}

#[test]
fn test_cli_show_missing_record_fails() {
    let temp_dir = create_cli_test_environment();

    dossier_cmd(&temp_dir)
        .args(["record", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record with ID 42 not found"));
}
