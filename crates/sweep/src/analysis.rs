//! Summaries and aggregations over sweep result sets.

use serde::Serialize;
use thruster_core::units::mg_s_to_kg_s;
use thruster_propulsion::{HallPerformance, IonPerformance};

/// A row of a sweep table: gas, voltage and the second (log-spaced) axis.
pub trait SweepRecord {
    fn gas(&self) -> &str;
    fn voltage_v(&self) -> f64;
    /// Beam current (A) for ion engines, mass flow (kg/s) for Hall thrusters.
    fn second_axis(&self) -> f64;
}

impl SweepRecord for IonPerformance {
    fn gas(&self) -> &str {
        &self.gas
    }

    fn voltage_v(&self) -> f64 {
        self.accel_voltage_v
    }

    fn second_axis(&self) -> f64 {
        self.beam_current_a
    }
}

impl SweepRecord for HallPerformance {
    fn gas(&self) -> &str {
        &self.gas
    }

    fn voltage_v(&self) -> f64 {
        self.discharge_voltage_v
    }

    fn second_axis(&self) -> f64 {
        self.mass_flow_kg_s
    }
}

/// Inclusive sub-region of a sweep used for summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingWindow {
    pub gas: String,
    pub voltage_v: (f64, f64),
    pub second_axis: (f64, f64),
}

impl OperatingWindow {
    /// Xenon, 1500-2500 V, 1-3 A.
    pub fn typical_ion() -> Self {
        Self {
            gas: "Xenon".to_string(),
            voltage_v: (1_500.0, 2_500.0),
            second_axis: (1.0, 3.0),
        }
    }

    /// Xenon, 300-500 V, 3-7 mg/s.
    pub fn typical_hall() -> Self {
        Self {
            gas: "Xenon".to_string(),
            voltage_v: (300.0, 500.0),
            second_axis: (mg_s_to_kg_s(3.0), mg_s_to_kg_s(7.0)),
        }
    }

    pub fn contains<R: SweepRecord>(&self, record: &R) -> bool {
        let v = record.voltage_v();
        let s = record.second_axis();
        record.gas().eq_ignore_ascii_case(&self.gas)
            && (self.voltage_v.0..=self.voltage_v.1).contains(&v)
            && (self.second_axis.0..=self.second_axis.1).contains(&s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonSummary {
    pub points: usize,
    pub space_charge_limited: usize,
    pub thrust_n: f64,
    pub isp_s: f64,
    pub power_w: f64,
    pub perveance_margin: f64,
    pub thrust_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HallSummary {
    pub points: usize,
    pub thrust_n: f64,
    pub isp_s: f64,
    pub power_w: f64,
}

/// Means over the ion results inside `window`; `None` when the window is empty.
pub fn summarize_ion(results: &[IonPerformance], window: &OperatingWindow) -> Option<IonSummary> {
    let selected: Vec<&IonPerformance> = results.iter().filter(|r| window.contains(*r)).collect();
    if selected.is_empty() {
        return None;
    }
    Some(IonSummary {
        points: selected.len(),
        space_charge_limited: selected
            .iter()
            .filter(|r| r.is_space_charge_limited())
            .count(),
        thrust_n: mean(selected.iter().map(|r| r.thrust_n)),
        isp_s: mean(selected.iter().map(|r| r.isp_s)),
        power_w: mean(selected.iter().map(|r| r.power_w)),
        perveance_margin: mean(selected.iter().map(|r| r.perveance_margin)),
        thrust_efficiency: mean(selected.iter().map(|r| r.thrust_efficiency())),
    })
}

/// Means over the Hall results inside `window`; `None` when the window is empty.
pub fn summarize_hall(
    results: &[HallPerformance],
    window: &OperatingWindow,
) -> Option<HallSummary> {
    let selected: Vec<&HallPerformance> = results.iter().filter(|r| window.contains(*r)).collect();
    if selected.is_empty() {
        return None;
    }
    Some(HallSummary {
        points: selected.len(),
        thrust_n: mean(selected.iter().map(|r| r.thrust_n)),
        isp_s: mean(selected.iter().map(|r| r.isp_s)),
        power_w: mean(selected.iter().map(|r| r.power_w)),
    })
}

/// Mean of `metric` per distinct voltage for one gas, averaged over the
/// second axis. Voltages are returned in first-seen order.
pub fn mean_by_voltage<R, F>(results: &[R], gas: &str, metric: F) -> Vec<(f64, f64)>
where
    R: SweepRecord,
    F: Fn(&R) -> f64,
{
    let mut groups: Vec<(f64, f64, usize)> = Vec::new();
    for record in results.iter().filter(|r| r.gas().eq_ignore_ascii_case(gas)) {
        let voltage = record.voltage_v();
        let value = metric(record);
        match groups.iter_mut().find(|(v, _, _)| *v == voltage) {
            Some(group) => {
                group.1 += value;
                group.2 += 1;
            }
            None => groups.push((voltage, value, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(voltage, sum, count)| (voltage, sum / count as f64))
        .collect()
}

/// Distinct gases in first-seen order.
pub fn gases<R: SweepRecord>(results: &[R]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in results {
        if !names.iter().any(|n| n == record.gas()) {
            names.push(record.gas().to_string());
        }
    }
    names
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
