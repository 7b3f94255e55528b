use serde_json::Value;
use thruster_lab::export;
use thruster_lab::physics::PhysicalConstants;
use thruster_lab::propulsion::{
    Divergence, GasCatalog, HallThrusterConfig, IonEngineConfig, PropulsionCalculator,
    ThrusterKind,
};
use thruster_lab::sweep::{sweep_hall, sweep_ion};

#[test]
fn ion_csv_has_header_and_one_row_per_point() {
    let calc = PropulsionCalculator::default();
    let engine =
        IonEngineConfig::new(0.01, 0.002, 0.7, 0.95, Divergence::parse("cos", 5.0).unwrap())
            .unwrap();
    let results = sweep_ion(&calc, &["Xenon"], (1000.0, 2000.0), 2, (0.5, 3.0), 3, &engine).unwrap();

    let mut buf: Vec<u8> = Vec::new();
    export::ion::write_table(&mut buf, &results).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], export::ion::HEADER);
    assert_eq!(lines.len(), 1 + results.len());

    let columns = export::ion::HEADER.split(',').count();
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), columns);
        assert!(line.starts_with("Xenon,"));
    }
    // Largest current at 1 kV is beyond the Child-Langmuir limit.
    assert!(lines[3].ends_with(",space_charge_limited"));
}

#[test]
fn hall_csv_round_trips_through_csv_reader() {
    let calc = PropulsionCalculator::default();
    let engine = HallThrusterConfig::new(0.6, 0.85, Divergence::parse("cos", 30.0).unwrap()).unwrap();
    let results =
        sweep_hall(&calc, &["Xenon", "Argon"], (300.0, 500.0), 3, (2e-6, 8e-6), 2, &engine).unwrap();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("hall_sweep.csv");
    export::hall::write_csv(&path, &results).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>().join(","), export::hall::HEADER);
    let thrust_idx = headers.iter().position(|h| h == "thrust_n").unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 12);
    for (row, result) in rows.iter().zip(&results) {
        let thrust: f64 = row[thrust_idx].parse().unwrap();
        assert_eq!(thrust, result.thrust_n);
    }
}

#[test]
fn json_envelope_carries_kind_and_count() {
    let calc = PropulsionCalculator::default();
    let engine = HallThrusterConfig::new(0.6, 0.85, Divergence::none()).unwrap();
    let results = sweep_hall(&calc, &["Krypton"], (300.0, 300.0), 1, (5e-6, 5e-6), 1, &engine).unwrap();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hall_sweep.json");
    export::json::write_results(&path, ThrusterKind::Hall, &results).unwrap();

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["thruster_type"], "hall");
    assert_eq!(doc["count"], 1);
    assert_eq!(doc["results"][0]["gas"], "Krypton");
    assert_eq!(doc["results"][0]["eta_div"], 1.0);
}

#[test]
fn gas_names_with_commas_are_quoted() {
    let gases = GasCatalog::new([("Xe, enriched", 131.293)]).unwrap();
    let calc = PropulsionCalculator::new(PhysicalConstants::default(), gases);
    let engine =
        IonEngineConfig::new(0.01, 0.002, 0.7, 0.95, Divergence::parse("cos", 5.0).unwrap())
            .unwrap();
    let results =
        sweep_ion(&calc, &["Xe, enriched"], (1000.0, 2000.0), 2, (0.5, 1.0), 2, &engine).unwrap();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ion_sweep.csv");
    export::ion::write_csv(&path, &results).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let columns = rdr.headers().unwrap().len();
    assert_eq!(columns, export::ion::HEADER.split(',').count());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.len(), columns);
        assert_eq!(&row[0], "Xe, enriched");
    }
}
