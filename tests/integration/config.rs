use predicates::prelude::*;

use crate::common::TestProject;

/// Test `config path` prints the overridden location
#[test]
fn test_config_path() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

/// Test `config` with no subcommand shows defaults without creating a file
#[test]
fn test_config_show_defaults() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("replace_variables_in_filenames = true"))
        .stdout(predicate::str::contains("not created"));

    assert!(!project.config_path().exists());
}

/// Test set, set-var, and unset-var persist to the file
#[test]
fn test_config_set_and_vars() {
    let project = TestProject::new().unwrap();

    project.newplus_command().args(["config", "set", "show_hidden", "true"]).assert().success();
    project
        .newplus_command()
        .args(["config", "set-var", "COMPANY", "Acme Corp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added variable"));

    let content = project.read_config().unwrap();
    assert!(content.contains("show_hidden = true"));
    assert!(content.contains("COMPANY = \"Acme Corp\""));

    project.newplus_command().args(["config", "unset-var", "COMPANY"]).assert().success();
    assert!(!project.read_config().unwrap().contains("COMPANY"));
}

/// Test config variables reach templates
#[test]
fn test_config_variable_used_by_new() {
    let project = TestProject::new().unwrap();
    project.add_template("Letter.txt", "From $COMPANY$\n").unwrap();

    project.newplus_command().args(["config", "set-var", "COMPANY", "Acme"]).assert().success();
    project.newplus_command().args(["new", "Letter.txt"]).assert().success();

    assert_eq!(project.read_output("Letter.txt").unwrap(), "From Acme\n");
}

/// Test unknown options are rejected with the accepted keys
#[test]
fn test_config_set_unknown_key() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option 'colour'"))
        .stderr(predicate::str::contains("hide_file_extensions"));
}
