use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

/// Test rendering stdin with overrides and config variables
#[test]
fn test_render_stdin() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .args(["render", "--var", "NAME=World"])
        .write_stdin("Hello $NAME$ from $AUTHOR$ and $UNKNOWN$")
        .assert()
        .success()
        .stdout("Hello World from Test Author and $UNKNOWN$");
}

/// Test transitive variables and the literal dollar sign
#[test]
fn test_render_transitive() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .args(["render", "--no-builtins", "--var", "A=$B$", "--var", "B=$C$", "--var", "C=done"])
        .write_stdin("$A$ costs $5")
        .assert()
        .success()
        .stdout("done costs $5");
}

/// Test rendering a file argument
#[test]
fn test_render_file() {
    let project = TestProject::new().unwrap();
    let path = project.root().join("input.txt");
    fs::write(&path, "year=$YEAR$\n").unwrap();

    project
        .newplus_command()
        .arg("render")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^year=\d{4}\n$").unwrap());
}

/// Test strict mode fails on leftover tokens
#[test]
fn test_render_strict() {
    let project = TestProject::new().unwrap();

    project
        .newplus_command()
        .args(["render", "--strict"])
        .write_stdin("$MISSING$")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unresolved variables: MISSING"));
}

/// Test the pass limit leaves a partial result instead of failing
#[test]
fn test_render_pass_limit() {
    let project = TestProject::new().unwrap();
    let mut cmd = project.newplus_command();
    cmd.args(["render", "--no-builtins"]);
    for i in 0..11 {
        cmd.arg("--var").arg(format!("V{i}=$V{}$", i + 1));
    }
    cmd.arg("--var").arg("V11=end");

    cmd.write_stdin("$V0$")
        .assert()
        .success()
        .stdout("$V10$")
        .stderr(predicate::str::contains("stopped after 10 passes"));
}
