use predicates::prelude::*;

use crate::common::TestProject;

/// Test malformed config produces a config error with guidance
#[test]
fn test_malformed_config() {
    let project = TestProject::with_samples().unwrap();
    project.write_config("templates_dir = [oops").unwrap();

    project
        .newplus_command()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("config"));
}

/// Test invalid variable names in the config are reported
#[test]
fn test_invalid_config_variable_name() {
    let project = TestProject::with_samples().unwrap();
    project.write_config("[variables]\nauthor = \"x\"\n").unwrap();

    project
        .newplus_command()
        .args(["new", "Readme.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("author"));
}

/// Test --verbose emits debug logs on stderr
#[test]
fn test_verbose_logging() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Discovered 3 templates"));
}

/// Test --quiet suppresses the creation message
#[test]
fn test_quiet_new() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["--quiet", "new", "Readme.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(project.work_dir().join("Readme.md").is_file());
}
