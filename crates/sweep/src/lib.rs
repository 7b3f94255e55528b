//! Parametric sweeps over ion engine and Hall thruster operating points.
//!
//! A sweep enumerates gas × voltage × (current | mass flow) in that nesting
//! order. Voltage is always linearly spaced and the second axis always
//! logarithmically spaced. The first failing cell aborts the whole sweep.

pub mod analysis;
pub mod axis;
pub mod plan;

use thiserror::Error;
use thruster_propulsion::{
    HallPerformance, HallThrusterConfig, IonEngineConfig, IonPerformance, PerformanceError,
    PropulsionCalculator, ThrusterKind,
};
use tracing::debug;

pub use axis::{Spacing, SweepAxis, linspace, logspace};
pub use plan::{PlanError, SweepPlan, calculator_from_config};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid {axis} axis: {reason}")]
    InvalidAxis {
        axis: &'static str,
        reason: &'static str,
    },
    #[error("sweep requires at least one gas")]
    NoGases,
    #[error("{thruster} sweep failed at gas={gas}, voltage={voltage_v} V, {axis}={value}: {source}")]
    Cell {
        thruster: &'static str,
        gas: String,
        voltage_v: f64,
        axis: &'static str,
        value: f64,
        #[source]
        source: PerformanceError,
    },
}

/// Ion engine sweep: gas × accelerating voltage × beam current.
#[derive(Debug, Clone)]
pub struct IonSweep {
    pub gases: Vec<String>,
    pub voltage: SweepAxis,
    pub current: SweepAxis,
    pub engine: IonEngineConfig,
}

impl IonSweep {
    pub fn new<S: AsRef<str>>(
        gases: &[S],
        voltage_range_v: (f64, f64),
        voltage_steps: usize,
        current_range_a: (f64, f64),
        current_steps: usize,
        engine: IonEngineConfig,
    ) -> Result<Self, SweepError> {
        let sweep = Self {
            gases: gas_list(gases)?,
            voltage: SweepAxis::linear(
                "accel_voltage_v",
                voltage_range_v.0,
                voltage_range_v.1,
                voltage_steps,
            )?,
            current: SweepAxis::logarithmic(
                "beam_current_a",
                current_range_a.0,
                current_range_a.1,
                current_steps,
            )?,
            engine,
        };
        sweep.checked_len()?;
        Ok(sweep)
    }

    /// Number of grid cells the sweep produces, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    fn checked_len(&self) -> Result<usize, SweepError> {
        grid_len(self.gases.len(), &self.voltage, &self.current)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn run(&self, calculator: &PropulsionCalculator) -> Result<Vec<IonPerformance>, SweepError> {
        let capacity = self.checked_len()?;
        let voltages = self.voltage.values();
        let currents = self.current.values();
        debug!(
            gases = self.gases.len(),
            voltages = voltages.len(),
            currents = currents.len(),
            "starting ion engine sweep"
        );

        let mut results = Vec::with_capacity(capacity);
        for gas in &self.gases {
            for &va in &voltages {
                for &ib in &currents {
                    let result = calculator
                        .ion_engine(&self.engine, va, ib, gas)
                        .map_err(|source| SweepError::Cell {
                            thruster: ThrusterKind::Ion.as_str(),
                            gas: gas.clone(),
                            voltage_v: va,
                            axis: self.current.name,
                            value: ib,
                            source,
                        })?;
                    results.push(result);
                }
            }
        }

        debug!(points = results.len(), "ion engine sweep complete");
        Ok(results)
    }
}

/// Hall thruster sweep: gas × discharge voltage × anode mass flow.
#[derive(Debug, Clone)]
pub struct HallSweep {
    pub gases: Vec<String>,
    pub voltage: SweepAxis,
    pub mass_flow: SweepAxis,
    pub engine: HallThrusterConfig,
}

impl HallSweep {
    pub fn new<S: AsRef<str>>(
        gases: &[S],
        voltage_range_v: (f64, f64),
        voltage_steps: usize,
        mass_flow_range_kg_s: (f64, f64),
        mass_flow_steps: usize,
        engine: HallThrusterConfig,
    ) -> Result<Self, SweepError> {
        let sweep = Self {
            gases: gas_list(gases)?,
            voltage: SweepAxis::linear(
                "discharge_voltage_v",
                voltage_range_v.0,
                voltage_range_v.1,
                voltage_steps,
            )?,
            mass_flow: SweepAxis::logarithmic(
                "mass_flow_kg_s",
                mass_flow_range_kg_s.0,
                mass_flow_range_kg_s.1,
                mass_flow_steps,
            )?,
            engine,
        };
        sweep.checked_len()?;
        Ok(sweep)
    }

    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    fn checked_len(&self) -> Result<usize, SweepError> {
        grid_len(self.gases.len(), &self.voltage, &self.mass_flow)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn run(
        &self,
        calculator: &PropulsionCalculator,
    ) -> Result<Vec<HallPerformance>, SweepError> {
        let capacity = self.checked_len()?;
        let voltages = self.voltage.values();
        let flows = self.mass_flow.values();
        debug!(
            gases = self.gases.len(),
            voltages = voltages.len(),
            mass_flows = flows.len(),
            "starting Hall thruster sweep"
        );

        let mut results = Vec::with_capacity(capacity);
        for gas in &self.gases {
            for &vd in &voltages {
                for &mdot in &flows {
                    let result = calculator
                        .hall_thruster(&self.engine, vd, mdot, gas)
                        .map_err(|source| SweepError::Cell {
                            thruster: ThrusterKind::Hall.as_str(),
                            gas: gas.clone(),
                            voltage_v: vd,
                            axis: self.mass_flow.name,
                            value: mdot,
                            source,
                        })?;
                    results.push(result);
                }
            }
        }

        debug!(points = results.len(), "Hall thruster sweep complete");
        Ok(results)
    }
}

/// Sweep an ion engine over `gases × linspace(voltage) × logspace(current)`.
pub fn sweep_ion<S: AsRef<str>>(
    calculator: &PropulsionCalculator,
    gases: &[S],
    voltage_range_v: (f64, f64),
    voltage_steps: usize,
    current_range_a: (f64, f64),
    current_steps: usize,
    engine: &IonEngineConfig,
) -> Result<Vec<IonPerformance>, SweepError> {
    IonSweep::new(
        gases,
        voltage_range_v,
        voltage_steps,
        current_range_a,
        current_steps,
        *engine,
    )?
    .run(calculator)
}

/// Sweep a Hall thruster over `gases × linspace(voltage) × logspace(mass flow)`.
pub fn sweep_hall<S: AsRef<str>>(
    calculator: &PropulsionCalculator,
    gases: &[S],
    voltage_range_v: (f64, f64),
    voltage_steps: usize,
    mass_flow_range_kg_s: (f64, f64),
    mass_flow_steps: usize,
    engine: &HallThrusterConfig,
) -> Result<Vec<HallPerformance>, SweepError> {
    HallSweep::new(
        gases,
        voltage_range_v,
        voltage_steps,
        mass_flow_range_kg_s,
        mass_flow_steps,
        *engine,
    )?
    .run(calculator)
}

fn grid_len(gases: usize, voltage: &SweepAxis, second: &SweepAxis) -> Result<usize, SweepError> {
    gases
        .checked_mul(voltage.steps)
        .and_then(|n| n.checked_mul(second.steps))
        .ok_or(SweepError::InvalidAxis {
            axis: second.name,
            reason: "grid size overflows usize",
        })
}

fn gas_list<S: AsRef<str>>(gases: &[S]) -> Result<Vec<String>, SweepError> {
    if gases.is_empty() {
        return Err(SweepError::NoGases);
    }
    Ok(gases.iter().map(|g| g.as_ref().to_string()).collect())
}
