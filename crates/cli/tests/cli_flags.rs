use assert_cmd::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn guext() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("guext"));
    cmd.env_remove("GUEXT_CONFIG").env("RUST_LOG", "warn");
    cmd
}

fn setup_solution() -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let app = temp.path().join("solution").join("App");
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("App.csproj"), "<Project />\n").unwrap();
    fs::write(app.join("file1.cs"), "using System;\nclass X{}\n").unwrap();
    fs::write(
        app.join("file2.cs"),
        "using System;\nusing System.Linq;\nclass Y{}\n",
    )
    .unwrap();
    let solution = temp.path().join("solution");
    (temp, solution)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn missing_directory_prints_hint() {
    guext()
        .assert()
        .code(2)
        .stdout(contains("You need to specify a project or solution directory."));
}

#[test]
fn empty_directory_value_prints_hint() {
    guext()
        .args(["-d", ""])
        .assert()
        .code(2)
        .stdout(contains("You need to specify a project or solution directory."));
}

#[test]
fn version_alone_exits_cleanly() {
    guext()
        .arg("-version")
        .assert()
        .success()
        .stdout(contains("guext version info:"))
        .stdout(contains(format!("- Version: {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("- Builder Arch: "));
}

#[test]
fn version_does_not_stop_processing() {
    let (_temp, solution) = setup_solution();

    guext()
        .arg("-v")
        .arg("-d")
        .arg(&solution)
        .arg("-disable-isolation")
        .assert()
        .success()
        .stdout(contains("guext version info:"))
        .stdout(contains("Processing '"));

    let app = solution.join("App");
    assert_eq!(read(&app.join("file1.cs")), "class X{}\n");
    assert_eq!(read(&app.join("file2.cs")), "class Y{}\n");
    assert_eq!(
        read(&app.join("GlobalUsings.cs")),
        "global using System;\nglobal using System.Linq;\n"
    );
}

#[test]
fn explicit_isolation_values_are_accepted() {
    let (_temp, solution) = setup_solution();
    guext()
        .arg("-disable-isolation=true")
        .arg("-d")
        .arg(&solution)
        .assert()
        .success();
    assert_eq!(read(&solution.join("App").join("file1.cs")), "class X{}\n");

    let (_temp, solution) = setup_solution();
    guext()
        .arg("-disable-isolation=false")
        .arg("-d")
        .arg(&solution)
        .assert()
        .success()
        .stdout(contains(".guext-tmp"));
    assert_eq!(
        read(&solution.join("App").join("file1.cs")),
        "using System;\nclass X{}\n"
    );
}

#[test]
fn explicit_version_value_is_accepted() {
    guext()
        .arg("-version=true")
        .assert()
        .success()
        .stdout(contains("guext version info:"));
}

#[test]
fn default_run_leaves_original_tree_alone() {
    let (temp, solution) = setup_solution();

    guext()
        .arg("-d")
        .arg(&solution)
        .assert()
        .success()
        .stdout(contains(".guext-tmp"));

    let app = solution.join("App");
    assert_eq!(read(&app.join("file1.cs")), "using System;\nclass X{}\n");
    assert!(!app.join("GlobalUsings.cs").exists());

    let staged: Vec<_> = fs::read_dir(temp.path().join(".guext-tmp"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .collect();
    assert_eq!(staged.len(), 1);
    let copy = staged[0].path().join("App");
    assert_eq!(read(&copy.join("file1.cs")), "class X{}\n");
    assert_eq!(
        read(&copy.join("GlobalUsings.cs")),
        "global using System;\nglobal using System.Linq;\n"
    );
}

#[test]
fn zero_projects_is_reported_as_failure() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("loose.cs"), "using System;\n").unwrap();

    guext()
        .arg("-d")
        .arg(temp.path())
        .assert()
        .code(3)
        .stdout(contains(
            "The specified directory does not contain any .csproj files.",
        ));

    assert_eq!(read(&temp.path().join("loose.cs")), "using System;\n");
}

#[test]
fn nonexistent_directory_is_an_error() {
    let temp = tempdir().unwrap();

    guext()
        .arg("-d")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stdout(contains("Error:"))
        .stdout(contains("is not a directory"));
}

#[test]
fn json_report_is_machine_readable() {
    let (_temp, solution) = setup_solution();

    let output = guext()
        .args(["-json", "-disable-isolation", "-d"])
        .arg(&solution)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["report"]["roots"][0]["directives"], 3);
    assert_eq!(body["report"]["roots"][0]["aggregate"]["lines"], 2);
}

#[test]
fn json_mode_sends_version_block_to_stderr() {
    let (_temp, solution) = setup_solution();

    let output = guext()
        .args(["-json", "-v", "-disable-isolation", "-d"])
        .arg(&solution)
        .output()
        .unwrap();

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(String::from_utf8_lossy(&output.stderr).contains("guext version info:"));
}

#[test]
fn config_from_environment_renames_aggregate() {
    let (temp, solution) = setup_solution();
    let config = temp.path().join("guext.toml");
    fs::write(&config, "aggregate_file_name = \"Usings.cs\"\n").unwrap();

    guext()
        .env("GUEXT_CONFIG", &config)
        .args(["-disable-isolation", "-d"])
        .arg(&solution)
        .assert()
        .success();

    let app = solution.join("App");
    assert!(app.join("Usings.cs").is_file());
    assert!(!app.join("GlobalUsings.cs").exists());
}

#[test]
fn invalid_config_flag_aborts_before_touching_files() {
    let (temp, solution) = setup_solution();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "directive_prefix = \"\"\n").unwrap();

    guext()
        .arg("-config")
        .arg(&config)
        .args(["-disable-isolation", "-d"])
        .arg(&solution)
        .assert()
        .code(1)
        .stdout(contains("Failed to load configuration"));

    assert_eq!(
        read(&solution.join("App").join("file1.cs")),
        "using System;\nclass X{}\n"
    );
}
