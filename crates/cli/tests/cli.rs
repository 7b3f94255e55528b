use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const SMALL_CONFIG: &str = r#"
gases = ["Xenon", "Krypton"]

[ion_engine]
voltage_range_v = [1000.0, 3000.0]
voltage_steps = 3
current_range_a = [0.5, 2.0]
current_steps = 2

[hall_thruster]
voltage_range_v = [300.0, 500.0]
voltage_steps = 3
mass_flow_range_kg_s = [3.0e-6, 7.0e-6]
mass_flow_steps = 3
"#;

fn data_lines(path: &Path) -> usize {
    let text = fs::read_to_string(path).expect("read csv");
    text.lines().count() - 1
}

#[test]
fn thruster_ion_prints_performance() {
    Command::cargo_bin("thruster")
        .expect("thruster bin")
        .args(["ion", "--voltage", "2000", "--current", "2.0", "--gas", "xenon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Ion Engine (Xenon) ==="))
        .stdout(predicate::str::contains("space_charge_limited"));
}

#[test]
fn thruster_hall_json_is_tagged() {
    let output = Command::cargo_bin("thruster")
        .expect("thruster bin")
        .args([
            "--json",
            "hall",
            "--voltage",
            "400",
            "--mass-flow-mg-s",
            "5",
            "--divergence-model",
            "gaussian",
            "--divergence-angle",
            "20",
        ])
        .output()
        .expect("run thruster");
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(doc["thruster_type"], "hall");
    assert_eq!(doc["gas"], "Xenon");
    assert!(doc["thrust_n"].as_f64().unwrap() > 0.0);
}

#[test]
fn thruster_rejects_unknown_gas() {
    Command::cargo_bin("thruster")
        .expect("thruster bin")
        .args(["ion", "--voltage", "2000", "--current", "1.0", "--gas", "Neon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gas 'Neon' not found"));
}

#[test]
fn sweep_writes_both_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("lab.toml");
    fs::write(&config, SMALL_CONFIG).unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("sweep")
        .expect("sweep bin")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ion Engine Summary"))
        .stdout(predicate::str::contains("Hall Thruster Summary"));

    assert_eq!(data_lines(&out.join("ion_sweep.csv")), 2 * 3 * 2);
    assert_eq!(data_lines(&out.join("hall_sweep.csv")), 2 * 3 * 3);
    assert!(out.join("ion_sweep.json").exists());
    assert!(out.join("hall_sweep.json").exists());
}

#[test]
fn sweep_reads_config_from_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("lab.toml");
    fs::write(&config, SMALL_CONFIG).unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("sweep")
        .expect("sweep bin")
        .env("THRUSTER_LAB_CONFIG", &config)
        .args(["--thruster", "hall", "--gas", "Krypton", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    assert_eq!(data_lines(&out.join("hall_sweep.csv")), 3 * 3);
    assert!(!out.join("ion_sweep.csv").exists());
}

#[test]
fn sweep_rejects_gas_outside_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("lab.toml");
    fs::write(&config, SMALL_CONFIG).unwrap();

    Command::cargo_bin("sweep")
        .expect("sweep bin")
        .args(["--config", config.to_str().unwrap(), "--gas", "Helium", "--output-dir"])
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Helium"));
}
