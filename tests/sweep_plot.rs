use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use thruster_lab::export;
use thruster_lab::propulsion::{
    Divergence, HallThrusterConfig, IonEngineConfig, PropulsionCalculator,
};
use thruster_lab::sweep::{sweep_hall, sweep_ion};

fn write_ion_table(path: &Path) {
    let calc = PropulsionCalculator::default();
    let engine =
        IonEngineConfig::new(0.01, 0.002, 0.7, 0.95, Divergence::parse("cos", 5.0).unwrap())
            .unwrap();
    let results = sweep_ion(
        &calc,
        &["Xenon", "Argon"],
        (500.0, 4000.0),
        5,
        (0.1, 5.0),
        4,
        &engine,
    )
    .unwrap();
    export::ion::write_csv(path, &results).unwrap();
}

fn is_png(path: &Path) -> bool {
    let bytes = std::fs::read(path).expect("read png");
    bytes.len() > 8 && bytes[..8] == [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
}

#[test]
fn line_chart_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("ion_sweep.csv");
    let png_path = dir.path().join("plots").join("thrust.png");
    write_ion_table(&csv_path);

    Command::cargo_bin("sweep_plot")
        .expect("sweep_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--metric",
            "thrust",
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    assert!(is_png(&png_path));
}

#[test]
fn perveance_heatmap_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("ion_sweep.csv");
    let png_path = dir.path().join("perveance.png");
    write_ion_table(&csv_path);

    Command::cargo_bin("sweep_plot")
        .expect("sweep_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--metric",
            "perveance",
            "--kind",
            "heatmap",
            "--gas",
            "Argon",
            "--log-color",
            "--width",
            "500",
            "--height",
            "400",
        ])
        .assert()
        .success();

    assert!(is_png(&png_path));
}

#[test]
fn hall_table_heatmap_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("hall_sweep.csv");
    let png_path = dir.path().join("isp.png");
    let calc = PropulsionCalculator::default();
    let engine = HallThrusterConfig::new(0.6, 0.85, Divergence::parse("cos", 30.0).unwrap()).unwrap();
    let results =
        sweep_hall(&calc, &["Xenon"], (200.0, 800.0), 4, (1e-6, 1e-5), 4, &engine).unwrap();
    export::hall::write_csv(&csv_path, &results).unwrap();

    Command::cargo_bin("sweep_plot")
        .expect("sweep_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--metric",
            "isp",
            "--kind",
            "heatmap",
            "--width",
            "500",
            "--height",
            "400",
        ])
        .assert()
        .success();

    assert!(is_png(&png_path));
}

#[test]
fn unknown_metric_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("ion_sweep.csv");
    write_ion_table(&csv_path);

    Command::cargo_bin("sweep_plot")
        .expect("sweep_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            dir.path().join("x.png").to_str().unwrap(),
            "--metric",
            "c3_km2_s2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing metric column"));
}

#[test]
fn power_against_thrust_scatter_renders_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("ion_sweep.csv");
    let png_path = dir.path().join("power_vs_thrust.png");
    write_ion_table(&csv_path);

    Command::cargo_bin("sweep_plot")
        .expect("sweep_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--metric",
            "power",
            "--kind",
            "scatter",
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    assert!(is_png(&png_path));
}
