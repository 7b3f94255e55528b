//! Electric propulsion performance models.
//!
//! The calculator pairs an immutable constants record with a gas catalog and
//! evaluates ion engines and Hall thrusters at single operating points. Every
//! call is a pure function of its inputs; to change configuration, build a new
//! [`PropulsionCalculator`].

pub mod divergence;
pub mod gas;
pub mod hall;
pub mod ion;
pub mod space_charge;

mod error;

use serde::Serialize;
use thruster_core::PhysicalConstants;

pub use divergence::{Divergence, DivergenceModel};
pub use error::PerformanceError;
pub use gas::GasCatalog;
pub use hall::{HallPerformance, HallThrusterConfig};
pub use ion::{IonEngineConfig, IonPerformance};
pub use space_charge::{ChildLangmuirLimit, SpaceChargeRegime};

/// Performance facade over a fixed set of constants and gases.
#[derive(Debug, Clone)]
pub struct PropulsionCalculator {
    constants: PhysicalConstants,
    gases: GasCatalog,
}

impl PropulsionCalculator {
    pub fn new(constants: PhysicalConstants, gases: GasCatalog) -> Self {
        Self { constants, gases }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn gases(&self) -> &GasCatalog {
        &self.gases
    }

    /// Evaluate an ion engine against a validated configuration.
    pub fn ion_engine(
        &self,
        config: &IonEngineConfig,
        accel_voltage_v: f64,
        beam_current_a: f64,
        gas: &str,
    ) -> Result<IonPerformance, PerformanceError> {
        let (name, mass) = self.gases.lookup(gas)?;
        ion::evaluate(
            &self.constants,
            name,
            mass,
            config,
            accel_voltage_v,
            beam_current_a,
        )
    }

    /// Evaluate a Hall thruster against a validated configuration.
    pub fn hall_thruster(
        &self,
        config: &HallThrusterConfig,
        discharge_voltage_v: f64,
        mass_flow_kg_s: f64,
        gas: &str,
    ) -> Result<HallPerformance, PerformanceError> {
        let (name, mass) = self.gases.lookup(gas)?;
        hall::evaluate(
            &self.constants,
            name,
            mass,
            config,
            discharge_voltage_v,
            mass_flow_kg_s,
        )
    }

    /// Flat-argument form of [`PropulsionCalculator::ion_engine`]; the engine
    /// configuration is validated on every call.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_ion_engine(
        &self,
        accel_voltage_v: f64,
        beam_current_a: f64,
        gas: &str,
        grid_area_m2: f64,
        grid_gap_m: f64,
        tau_geom: f64,
        tau_trans: f64,
        divergence_model: &str,
        divergence_angle_deg: f64,
    ) -> Result<IonPerformance, PerformanceError> {
        let (name, mass) = self.gases.lookup(gas)?;
        let divergence = Divergence::parse(divergence_model, divergence_angle_deg)?;
        let config = IonEngineConfig::new(grid_area_m2, grid_gap_m, tau_geom, tau_trans, divergence)?;
        ion::evaluate(
            &self.constants,
            name,
            mass,
            &config,
            accel_voltage_v,
            beam_current_a,
        )
    }

    /// Flat-argument form of [`PropulsionCalculator::hall_thruster`].
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_hall_thruster(
        &self,
        discharge_voltage_v: f64,
        mass_flow_kg_s: f64,
        gas: &str,
        eta_acc: f64,
        tau_prop: f64,
        divergence_model: &str,
        divergence_angle_deg: f64,
    ) -> Result<HallPerformance, PerformanceError> {
        let (name, mass) = self.gases.lookup(gas)?;
        let divergence = Divergence::parse(divergence_model, divergence_angle_deg)?;
        let config = HallThrusterConfig::new(eta_acc, tau_prop, divergence)?;
        hall::evaluate(
            &self.constants,
            name,
            mass,
            &config,
            discharge_voltage_v,
            mass_flow_kg_s,
        )
    }
}

impl Default for PropulsionCalculator {
    fn default() -> Self {
        Self::new(PhysicalConstants::default(), GasCatalog::noble_gases())
    }
}

/// Thruster family, used to tag exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrusterKind {
    Ion,
    Hall,
}

impl ThrusterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ThrusterKind::Ion => "ion",
            ThrusterKind::Hall => "hall",
        }
    }
}

/// Result of a single operating point of either thruster family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "thruster_type", rename_all = "snake_case")]
pub enum PerformanceResult {
    Ion(IonPerformance),
    Hall(HallPerformance),
}

impl PerformanceResult {
    pub fn kind(&self) -> ThrusterKind {
        match self {
            PerformanceResult::Ion(_) => ThrusterKind::Ion,
            PerformanceResult::Hall(_) => ThrusterKind::Hall,
        }
    }

    pub fn gas(&self) -> &str {
        match self {
            PerformanceResult::Ion(r) => &r.gas,
            PerformanceResult::Hall(r) => &r.gas,
        }
    }

    pub fn thrust_n(&self) -> f64 {
        match self {
            PerformanceResult::Ion(r) => r.thrust_n,
            PerformanceResult::Hall(r) => r.thrust_n,
        }
    }

    pub fn isp_s(&self) -> f64 {
        match self {
            PerformanceResult::Ion(r) => r.isp_s,
            PerformanceResult::Hall(r) => r.isp_s,
        }
    }
}

impl From<IonPerformance> for PerformanceResult {
    fn from(value: IonPerformance) -> Self {
        PerformanceResult::Ion(value)
    }
}

impl From<HallPerformance> for PerformanceResult {
    fn from(value: HallPerformance) -> Self {
        PerformanceResult::Hall(value)
    }
}
