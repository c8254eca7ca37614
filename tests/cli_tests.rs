use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn packes(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("packes").unwrap();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.toml"));
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("packes").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rewrite an ES module entry file"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("packes").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();

    packes(&temp_dir)
        .arg("init")
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let config_path = temp_dir.path().join("packes.toml");
    assert!(config_path.exists());
    let content = std::fs::read_to_string(config_path).unwrap();
    assert!(content.contains("esbuild"));
}

#[test]
fn test_pack_rejects_same_input_and_output() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("entry.js"), "import 'x';\n").unwrap();

    packes(&temp_dir)
        .args(["pack", "entry.js", "entry.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input should not equal to output"));

    // OUTPUT defaults to INPUT
    packes(&temp_dir)
        .args(["pack", "entry.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input should not equal to output"));
}

#[test]
fn test_pack_missing_entry() {
    let temp_dir = TempDir::new().unwrap();

    packes(&temp_dir)
        .args(["pack", "missing.js", "dist.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_pack_with_unavailable_bundler_cleans_up() {
    let temp_dir = TempDir::new().unwrap();
    let scratch = temp_dir.path().join("scratch");
    let config_path = temp_dir.path().join("packes.toml");
    std::fs::write(
        &config_path,
        format!(
            "[bundler]\nprogram = \"packes-test-no-such-bundler\"\n\n[scratch]\ndirectory = {:?}\n",
            scratch.display().to_string()
        ),
    )
    .unwrap();
    std::fs::write(temp_dir.path().join("entry.js"), "import {a} from './a';\n").unwrap();

    let mut cmd = Command::cargo_bin("packes").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["pack", "entry.js", "dist.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to launch bundler"));

    assert!(!temp_dir.path().join("dist.js").exists());
    assert!(!scratch.join("__entry__.js").exists());
    assert!(!scratch.join("__output__.js").exists());
}

#[test]
fn test_scan_prints_bridge_and_bindings() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("entry.js"),
        "import * as A from './m';\nimport Def, {x, y} from 'pkg';\nA.run(Def, x, y);\n",
    )
    .unwrap();

    let output = packes(&temp_dir)
        .args(["scan", "entry.js"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["bindings"], serde_json::json!(["A", "Def", "x", "y"]));
    let bridge = report["bridge_module"].as_str().unwrap();
    assert!(bridge.starts_with("export {A} from '"));
    assert!(bridge.ends_with("export {Def,x,y} from 'pkg';"));
    assert_eq!(report["stripped_body"], "A.run(Def, x, y);\n");
}
