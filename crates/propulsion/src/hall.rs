//! Hall-effect thruster performance.
//!
//! Ions are accelerated in a magnetically confined discharge rather than
//! extracted through grids, so no space-charge ceiling applies here.

use serde::Serialize;
use thruster_core::PhysicalConstants;
use thruster_core::units::{n_to_mn, w_to_kw};

use crate::divergence::Divergence;
use crate::error::{PerformanceError, fraction, positive};

/// Fixed efficiencies of a Hall thruster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HallThrusterConfig {
    /// Fraction of the discharge voltage converted into ion kinetic energy.
    eta_acc: f64,
    /// Propellant utilization: ionized and accelerated fraction of the flow.
    tau_prop: f64,
    divergence: Divergence,
}

impl HallThrusterConfig {
    pub fn new(eta_acc: f64, tau_prop: f64, divergence: Divergence) -> Result<Self, PerformanceError> {
        Ok(Self {
            eta_acc: fraction("eta_acc", eta_acc)?,
            tau_prop: fraction("tau_prop", tau_prop)?,
            divergence,
        })
    }

    pub fn eta_acc(&self) -> f64 {
        self.eta_acc
    }

    pub fn tau_prop(&self) -> f64 {
        self.tau_prop
    }

    pub fn divergence(&self) -> &Divergence {
        &self.divergence
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HallPerformance {
    pub gas: String,
    pub discharge_voltage_v: f64,
    pub mass_flow_kg_s: f64,
    pub exhaust_velocity_m_s: f64,
    pub eta_acc: f64,
    pub tau_prop: f64,
    pub eta_div: f64,
    pub thrust_n: f64,
    pub isp_s: f64,
    /// Rough discharge power estimate, `Vd · mdot q / (m_i η_acc)`.
    pub power_w: f64,
    /// Equivalent beam current `mdot q / m_i`, for comparison with ion engines.
    pub beam_current_a: f64,
}

impl HallPerformance {
    /// Thrust-to-power ratio in mN/kW.
    pub fn thrust_to_power_mn_kw(&self) -> f64 {
        n_to_mn(self.thrust_n) / w_to_kw(self.power_w)
    }
}

/// Evaluate a Hall thruster at `(discharge_voltage_v, mass_flow_kg_s)`.
///
/// The power figure is an approximation kept for compatibility with existing
/// sweep outputs; it is not derived from a discharge-current model.
pub fn evaluate(
    constants: &PhysicalConstants,
    gas: &str,
    gas_mass_amu: f64,
    config: &HallThrusterConfig,
    discharge_voltage_v: f64,
    mass_flow_kg_s: f64,
) -> Result<HallPerformance, PerformanceError> {
    let vd = positive("discharge_voltage_v", discharge_voltage_v)?;
    let mdot = positive("mass_flow_kg_s", mass_flow_kg_s)?;
    let q = constants.q;
    let m_i = gas_mass_amu * constants.amu;

    let v_e0 = (config.eta_acc * 2.0 * q * vd / m_i).sqrt();
    let eta_div = config.divergence.efficiency();
    let beam_current = mdot * q / m_i;

    Ok(HallPerformance {
        gas: gas.to_string(),
        discharge_voltage_v: vd,
        mass_flow_kg_s: mdot,
        exhaust_velocity_m_s: v_e0,
        eta_acc: config.eta_acc,
        tau_prop: config.tau_prop,
        eta_div,
        thrust_n: mdot * config.tau_prop * v_e0 * eta_div,
        isp_s: v_e0 * eta_div / constants.g0,
        power_w: vd * (mdot * q / (m_i * config.eta_acc)),
        beam_current_a: beam_current,
    })
}
