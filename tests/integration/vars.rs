use predicates::prelude::*;

use crate::common::TestProject;

/// Test the table lists built-ins, context, and configured variables
#[test]
fn test_vars_text() {
    let project = TestProject::with_samples().unwrap();

    project
        .newplus_command()
        .arg("vars")
        .assert()
        .success()
        .stdout(predicate::str::contains("$DATE"))
        .stdout(predicate::str::contains("$UUID"))
        .stdout(predicate::str::contains("$FILE_NAME"))
        .stdout(predicate::str::contains("Test Author"));
}

/// Test JSON output with resolved config values
#[test]
fn test_vars_json_resolved() {
    let project = TestProject::new().unwrap();
    project.write_config("[variables]\nSTAMP = \"built $YEAR$\"\n").unwrap();

    let output = project
        .newplus_command()
        .args(["vars", "--format", "json", "--resolve"])
        .assert()
        .success();

    let vars: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let stamp = vars["STAMP"].as_str().unwrap();
    assert!(stamp.starts_with("built "));
    assert!(!stamp.contains('$'));
    assert_eq!(vars["YEAR"].as_str().unwrap().len(), 4);
    assert!(vars["TARGET_DIR"].is_null());
    assert!(matches!(vars["PLATFORM"].as_str(), Some("linux" | "darwin" | "win32")));
}
