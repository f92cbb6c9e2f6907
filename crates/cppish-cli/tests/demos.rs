use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn cppish() -> Command {
    Command::cargo_bin("cppish").unwrap()
}

fn write_temp_program(dir: &tempfile::TempDir, source: &str) -> PathBuf {
    let path = dir.path().join("program.cppish");
    std::fs::write(&path, source).unwrap();
    path
}

#[test]
fn runs_hello_demo() {
    let root = workspace_root();
    let mut cmd = cppish();
    cmd.arg(root.join("demos/hello.cppish"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Hello, Cppish!"));
}

#[test]
fn runs_countdown_demo() {
    let root = workspace_root();
    let mut cmd = cppish();
    cmd.arg(root.join("demos/countdown.cppish"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("n = 5").and(predicate::str::contains("liftoff")));
}

#[test]
fn runs_branching_demo() {
    let root = workspace_root();
    let mut cmd = cppish();
    cmd.arg(root.join("demos/branching.cppish"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ratio is 7.5"));
}

#[test]
fn missing_file_is_nonzero() {
    let mut cmd = cppish();
    cmd.arg("no/such/file.cppish");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn parse_error_is_nonzero() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_temp_program(&tmp_dir, "int x = 5\n"); // missing semicolon

    let mut cmd = cppish();
    cmd.arg(path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn runtime_error_keeps_prior_output() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_temp_program(&tmp_dir, "cout << \"before\" << endl; int x = 1 / 0;");

    let mut cmd = cppish();
    cmd.arg(path);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("before"))
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn trace_flag_prints_statements_to_stderr() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_temp_program(&tmp_dir, "int x = 5; x = x + 1;");

    let mut cmd = cppish();
    cmd.arg(path).arg("--trace");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("declare int x = 5").and(predicate::str::contains("assign x = 6")));
}

#[test]
fn vars_flag_prints_final_variables() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_temp_program(&tmp_dir, "int count = 3; string name = \"zed\";");

    let mut cmd = cppish();
    cmd.arg(path).arg("--vars");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("count = 3").and(predicate::str::contains("name = zed")));
}

#[test]
fn iteration_budget_stops_runaway_loops() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_temp_program(&tmp_dir, "while (true) { }");

    let mut cmd = cppish();
    cmd.arg(path).arg("--max-iterations").arg("5");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("exceeded 5 iterations"));
}

#[test]
fn json_flag_emits_success_document() {
    let root = workspace_root();
    let mut cmd = cppish();
    cmd.arg(root.join("demos/hello.cppish")).arg("--json");
    cmd.assert().success().stdout(
        predicate::str::contains("\"status\":\"success\"")
            .and(predicate::str::contains("Hello, Cppish!")),
    );
}

#[test]
fn json_flag_reports_invalid_return_type() {
    let root = workspace_root();
    let mut cmd = cppish();
    cmd.arg(root.join("demos/hello.cppish"))
        .arg("--json")
        .arg("--return-type")
        .arg("float");
    cmd.assert().failure().stdout(
        predicate::str::contains("\"status\":\"error\"")
            .and(predicate::str::contains("invalid return type 'float'")),
    );
}

#[test]
fn json_flag_rejects_trace_and_vars() {
    let root = workspace_root();
    let mut cmd = cppish();
    cmd.arg(root.join("demos/hello.cppish"))
        .arg("--json")
        .arg("--trace");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    let mut cmd = cppish();
    cmd.arg(root.join("demos/hello.cppish"))
        .arg("--json")
        .arg("--vars");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn json_flag_classifies_runtime_errors() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_temp_program(&tmp_dir, "int x = 1 / 0;");

    let mut cmd = cppish();
    cmd.arg(path).arg("--json");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("runtime error: division by zero"));
}
