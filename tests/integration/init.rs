use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

/// Test init seeds samples that can be listed and used right away
#[test]
fn test_init_then_list_and_new() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Templates directory"));

    assert!(project.config_path().is_file());
    assert!(project.templates_dir().join("01. Readme.md").is_file());

    project
        .newplus_command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Readme.md"))
        .stdout(predicate::str::contains("Project"));

    project.newplus_command().args(["new", "Project", "--name", "demo"]).assert().success();
    assert!(project.work_dir().join("demo/demo.code-workspace").is_file());
    let readme = project.read_output("demo/README.md").unwrap();
    assert!(readme.starts_with("# demo\n"));
    assert!(!readme.contains("$AUTHOR$"));
}

/// Test init keeps an existing config
#[test]
fn test_init_keeps_config() {
    let project = TestProject::new().unwrap();
    project.write_config("hide_file_extensions = true\n").unwrap();

    project
        .newplus_command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept existing config"));

    assert_eq!(project.read_config().unwrap(), "hide_file_extensions = true\n");
}

/// Test init --force rewrites edited samples
#[test]
fn test_init_force() {
    let project = TestProject::new().unwrap();
    project.newplus_command().arg("init").assert().success();
    let readme = project.templates_dir().join("01. Readme.md");
    fs::write(&readme, "edited").unwrap();

    project.newplus_command().arg("init").assert().success();
    assert_eq!(fs::read_to_string(&readme).unwrap(), "edited");

    project.newplus_command().args(["init", "--force"]).assert().success();
    assert_ne!(fs::read_to_string(&readme).unwrap(), "edited");
}
