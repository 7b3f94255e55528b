//! Export helpers for CSV and JSON sweep artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// CSV tables through the `csv` crate, so gas names containing commas or
/// quotes are escaped.
fn write_records<W, I>(writer: W, header: &str, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(header.split(','))?;
    for row in rows {
        csv.write_record(&row)?;
    }
    csv.flush()
}

pub mod ion {
    use std::io::{self, Write};
    use std::path::Path;

    use thruster_propulsion::IonPerformance;

    pub const HEADER: &str = "gas,accel_voltage_v,beam_current_a,effective_beam_current_a,exhaust_velocity_m_s,ideal_thrust_n,thrust_n,isp_s,power_w,mass_flow_kg_s,tau_geom,tau_trans,tau_imp,eta_div,space_charge_current_a,current_density_limit_a_m2,perveance_margin,regime";

    /// Fields of one result, matching the header ordering. Floats use the
    /// shortest representation that round-trips.
    pub fn record(r: &IonPerformance) -> Vec<String> {
        vec![
            r.gas.clone(),
            r.accel_voltage_v.to_string(),
            r.beam_current_a.to_string(),
            r.effective_beam_current_a.to_string(),
            r.exhaust_velocity_m_s.to_string(),
            r.ideal_thrust_n.to_string(),
            r.thrust_n.to_string(),
            r.isp_s.to_string(),
            r.power_w.to_string(),
            r.mass_flow_kg_s.to_string(),
            r.tau_geom.to_string(),
            r.tau_trans.to_string(),
            r.tau_imp.to_string(),
            r.eta_div.to_string(),
            r.space_charge_current_a.to_string(),
            r.current_density_limit_a_m2.to_string(),
            r.perveance_margin.to_string(),
            r.regime.as_str().to_string(),
        ]
    }

    pub fn write_table<W: Write>(writer: W, results: &[IonPerformance]) -> io::Result<()> {
        super::write_records(writer, HEADER, results.iter().map(record))
    }

    /// Write a full table to `path` (`-` for stdout).
    pub fn write_csv(path: &Path, results: &[IonPerformance]) -> io::Result<()> {
        write_table(super::writer_for_path(path)?, results)
    }
}

pub mod hall {
    use std::io::{self, Write};
    use std::path::Path;

    use thruster_propulsion::HallPerformance;

    pub const HEADER: &str = "gas,discharge_voltage_v,mass_flow_kg_s,exhaust_velocity_m_s,eta_acc,tau_prop,eta_div,thrust_n,isp_s,power_w,beam_current_a";

    pub fn record(r: &HallPerformance) -> Vec<String> {
        vec![
            r.gas.clone(),
            r.discharge_voltage_v.to_string(),
            r.mass_flow_kg_s.to_string(),
            r.exhaust_velocity_m_s.to_string(),
            r.eta_acc.to_string(),
            r.tau_prop.to_string(),
            r.eta_div.to_string(),
            r.thrust_n.to_string(),
            r.isp_s.to_string(),
            r.power_w.to_string(),
            r.beam_current_a.to_string(),
        ]
    }

    pub fn write_table<W: Write>(writer: W, results: &[HallPerformance]) -> io::Result<()> {
        super::write_records(writer, HEADER, results.iter().map(record))
    }

    pub fn write_csv(path: &Path, results: &[HallPerformance]) -> io::Result<()> {
        write_table(super::writer_for_path(path)?, results)
    }
}

pub mod json {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};
    use std::path::Path;

    use thruster_propulsion::ThrusterKind;

    #[derive(Serialize)]
    struct Envelope<'a, T: Serialize> {
        thruster_type: ThrusterKind,
        count: usize,
        results: &'a [T],
    }

    /// Write a pretty-printed `{ thruster_type, count, results }` document.
    pub fn write_results<T: Serialize>(
        path: &Path,
        kind: ThrusterKind,
        results: &[T],
    ) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        let envelope = Envelope {
            thruster_type: kind,
            count: results.len(),
            results,
        };
        to_writer_pretty(&mut writer, &envelope)?;
        writeln!(writer)?;
        writer.flush()
    }
}
