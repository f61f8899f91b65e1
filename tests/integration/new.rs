use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

/// Test creating a file from a template in the current directory
#[test]
fn test_new_file_in_current_dir() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "Readme.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = project.read_output("Readme.md").unwrap();
    assert_eq!(content, "# Readme\n\nby Test Author\n");
}

/// Test explicit destination, name, and variable override
#[test]
fn test_new_with_name_and_var() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "readme.md", "docs", "--name", "GUIDE", "--var", "AUTHOR=Someone Else"])
        .assert()
        .success();

    let content = project.read_output("docs/GUIDE.md").unwrap();
    assert_eq!(content, "# GUIDE\n\nby Someone Else\n");
}

/// Test folder templates substitute names and content
#[test]
fn test_new_folder_template() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "Service", "--name", "billing"])
        .assert()
        .success();

    assert_eq!(
        project.read_output("billing/Cargo.toml").unwrap(),
        "[package]\nname = \"billing\"\n"
    );
    assert_eq!(
        project.read_output("billing/src/billing.rs").unwrap(),
        "// billing by Test Author\n"
    );
}

/// Test --no-filename-vars keeps tokens in names
#[test]
fn test_new_without_filename_vars() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "Service", "--no-filename-vars"])
        .assert()
        .success();

    assert!(project.work_dir().join("Service/src/$FILE_NAME$.rs").is_file());
}

/// Test existing targets are not overwritten without --force
#[test]
fn test_new_refuses_existing_target() {
    let project = TestProject::with_samples().unwrap();
    fs::write(project.work_dir().join("Readme.md"), "keep").unwrap();

    project
        .newplus_command()
        .args(["new", "Readme.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target already exists"))
        .stderr(predicate::str::contains("--force"));
    assert_eq!(project.read_output("Readme.md").unwrap(), "keep");

    project.newplus_command().args(["new", "Readme.md", "--force"]).assert().success();
    assert!(project.read_output("Readme.md").unwrap().starts_with("# Readme"));
}

/// Test unresolved tokens are reported but do not fail
#[test]
fn test_new_reports_unresolved() {
    let project = TestProject::with_samples().unwrap();
    project.add_template("Todo.txt", "owner: $OWNER$\n").unwrap();

    project
        .newplus_command()
        .args(["new", "Todo.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unresolved variables"))
        .stdout(predicate::str::contains("OWNER"));

    assert_eq!(project.read_output("Todo.txt").unwrap(), "owner: $OWNER$\n");
}

/// Test dry run prints the plan and writes nothing
#[test]
fn test_new_dry_run() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "Service", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create"))
        .stdout(predicate::str::contains("Cargo.toml"));

    assert!(!project.work_dir().join("Service").exists());
}

/// Test self-referencing variables terminate
#[test]
fn test_new_with_cyclic_variable() {
    let project = TestProject::with_samples().unwrap();
    project.add_template("Loop.txt", "$LOOP$\n").unwrap();

    project.newplus_command().args(["new", "Loop.txt", "--var", "LOOP=x$LOOP$"]).assert().success();

    assert_eq!(project.read_output("Loop.txt").unwrap(), "x$LOOP$\n");
}

/// Test unknown templates suggest close matches
#[test]
fn test_new_unknown_template_suggests() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "Readme.mdx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template 'Readme.mdx' not found"))
        .stderr(predicate::str::contains("Did you mean: Readme.md?"));
}

/// Test invalid --var names are rejected by argument parsing
#[test]
fn test_new_invalid_var_name() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["new", "Readme.md", "--var", "lower=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid variable name"));

    assert!(!project.work_dir().join("Readme.md").exists());
}

/// Test binary files are copied byte for byte
#[test]
fn test_new_binary_file() {
    let project = TestProject::new().unwrap();
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0, 0, b'$', b'X', b'$', 0xff];
    project.add_template("image.png", &bytes).unwrap();

    project
        .newplus_command()
        .args(["new", "image.png", "--var", "X=replaced"])
        .assert()
        .success();

    assert_eq!(fs::read(project.work_dir().join("image.png")).unwrap(), bytes);
}
