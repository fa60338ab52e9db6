use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/data");
    path.push(name);
    path
}

fn command(workdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mva2topsky").expect("binary is built");
    cmd.current_dir(workdir.path()).env_remove("MVA_CONFIG");
    cmd
}

#[test]
fn converts_sample_to_summer_and_winter_maps() {
    let workdir = tempfile::tempdir().expect("create temp dir");
    let output = workdir.path().join("mva.txt");

    command(&workdir)
        .arg(fixture("sample_mva.csv"))
        .arg(&output)
        .assert()
        .success();

    let expected = fs::read_to_string(fixture("sample_mva.expected.txt")).expect("read expected");
    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, expected);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let workdir = tempfile::tempdir().expect("create temp dir");
    let first = workdir.path().join("first.txt");
    let second = workdir.path().join("second.txt");

    for output in [&first, &second] {
        command(&workdir)
            .arg(fixture("sample_mva.csv"))
            .arg(output)
            .assert()
            .success();
    }

    let first = fs::read(&first).expect("read first");
    let second = fs::read(&second).expect("read second");
    assert_eq!(first, second);
}

#[test]
fn single_map_mode_writes_one_block() {
    let workdir = tempfile::tempdir().expect("create temp dir");
    let output = workdir.path().join("winter.txt");

    command(&workdir)
        .arg(fixture("sample_mva.csv"))
        .arg(&output)
        .args(["--maps", "winter", "--backend", "mean"])
        .assert()
        .success();

    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.starts_with("MAP:MVA Germany Winter\n"));
    assert_eq!(written.matches("MAP:").count(), 1);
    assert!(!written.contains("\n\n"));
    assert!(written.ends_with("TEXT:N050.20.00.000:E008.20.00.000:25\n"));
}

#[test]
fn config_file_overrides_headers() {
    let workdir = tempfile::tempdir().expect("create temp dir");
    let config = workdir.path().join("mva.toml");
    fs::write(
        &config,
        "[output]\nmaps = \"summer\"\nsummer_map_name = \"MVA Austria Summer\"\ncolor = \"blue\"\n",
    )
    .expect("write config");
    let output = workdir.path().join("summer.txt");

    command(&workdir)
        .arg(fixture("sample_mva.csv"))
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.starts_with("MAP:MVA Austria Summer\nFOLDER:MVA\nCOLOR:blue\n"));
    assert_eq!(written.matches("MAP:").count(), 1);
}

#[test]
fn missing_input_fails_with_message() {
    let workdir = tempfile::tempdir().expect("create temp dir");

    command(&workdir)
        .arg(workdir.path().join("absent.csv"))
        .arg(workdir.path().join("out.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("absent.csv"));
}

#[test]
fn header_only_csv_fails() {
    let workdir = tempfile::tempdir().expect("create temp dir");
    let input = workdir.path().join("empty.csv");
    fs::write(&input, "NAME,_geometry,LOWERLIMIT,MRVA_COLD\n").expect("write csv");

    command(&workdir)
        .arg(&input)
        .arg(workdir.path().join("out.txt"))
        .assert()
        .failure()
        .code(1);
}
