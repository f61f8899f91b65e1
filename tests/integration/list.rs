use predicates::prelude::*;

use crate::common::TestProject;

/// Test listing shows display names in sorted order
#[test]
fn test_list_templates() {
    let project = TestProject::with_samples().unwrap();

    let output = project.newplus_command().arg("list").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    let readme = stdout.find("Readme.md").expect("Readme.md listed");
    let notes = stdout.find("Notes.txt").expect("Notes.txt listed");
    let service = stdout.find("Service").expect("Service listed");
    assert!(readme < notes && notes < service);
    assert!(stdout.contains("Total: 3 templates"));
    assert!(!stdout.contains(".hidden.txt"));
}

/// Test list respects display settings from the config
#[test]
fn test_list_display_settings() {
    let project = TestProject::with_samples().unwrap();
    project
        .write_config(
            "hide_starting_digits = false\nhide_file_extensions = true\nshow_hidden = true\n",
        )
        .unwrap();

    project
        .newplus_command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("01. Readme"))
        .stdout(predicate::str::contains("01. Readme.md").count(1))
        .stdout(predicate::str::contains(".hidden"));
}

/// Test JSON output is machine readable
#[test]
fn test_list_json() {
    let project = TestProject::with_samples().unwrap();

    let output = project
        .newplus_command()
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let items: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "01. Readme.md");
    assert_eq!(items[0]["display_name"], "Readme.md");
    assert_eq!(items[0]["kind"], "file");
    assert_eq!(items[2]["kind"], "folder");
}

/// Test kind filters
#[test]
fn test_list_folders_only() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["list", "--folders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service"))
        .stdout(predicate::str::contains("Readme").not());
}

/// Test empty templates directory
#[test]
fn test_list_empty() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates found"));
}

/// Test missing templates directory
#[test]
fn test_list_missing_templates_dir() {
    let project = TestProject::new().unwrap();
    let missing = project.root().join("does-not-exist");

    project
        .newplus_command()
        .arg("list")
        .env("NEWPLUS_TEMPLATES_DIR", &missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Templates directory not found"))
        .stderr(predicate::str::contains("newplus init"));
}
