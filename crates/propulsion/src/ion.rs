//! Gridded ion engine performance.

use serde::Serialize;
use thruster_core::PhysicalConstants;
use thruster_core::units::{n_to_mn, w_to_kw};

use crate::divergence::Divergence;
use crate::error::{PerformanceError, fraction, positive};
use crate::space_charge::{self, SpaceChargeRegime};

/// Fixed geometry and loss parameters of an ion engine. Only
/// [`IonEngineConfig::new`] builds one, so every field stays in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IonEngineConfig {
    grid_area_m2: f64,
    grid_gap_m: f64,
    /// Geometric (open-area) transparency of the grids.
    tau_geom: f64,
    /// Ion transmission efficiency through the optics.
    tau_trans: f64,
    divergence: Divergence,
}

impl IonEngineConfig {
    pub fn new(
        grid_area_m2: f64,
        grid_gap_m: f64,
        tau_geom: f64,
        tau_trans: f64,
        divergence: Divergence,
    ) -> Result<Self, PerformanceError> {
        Ok(Self {
            grid_area_m2: positive("grid_area_m2", grid_area_m2)?,
            grid_gap_m: positive("grid_gap_m", grid_gap_m)?,
            tau_geom: fraction("tau_geom", tau_geom)?,
            tau_trans: fraction("tau_trans", tau_trans)?,
            divergence,
        })
    }

    pub fn grid_area_m2(&self) -> f64 {
        self.grid_area_m2
    }

    pub fn grid_gap_m(&self) -> f64 {
        self.grid_gap_m
    }

    pub fn tau_geom(&self) -> f64 {
        self.tau_geom
    }

    pub fn tau_trans(&self) -> f64 {
        self.tau_trans
    }

    pub fn divergence(&self) -> &Divergence {
        &self.divergence
    }

    /// Grid area actually open to the beam (m²).
    pub fn open_area_m2(&self) -> f64 {
        self.grid_area_m2 * self.tau_geom
    }
}

/// One evaluated ion engine operating point. Every loss factor is kept so
/// that efficiency losses can be attributed to their source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonPerformance {
    pub gas: String,
    pub accel_voltage_v: f64,
    pub beam_current_a: f64,
    pub effective_beam_current_a: f64,
    pub exhaust_velocity_m_s: f64,
    pub ideal_thrust_n: f64,
    pub thrust_n: f64,
    pub isp_s: f64,
    /// Drawn power, `Va · Ib` with the requested (not derated) current.
    pub power_w: f64,
    pub mass_flow_kg_s: f64,
    pub tau_geom: f64,
    pub tau_trans: f64,
    pub tau_imp: f64,
    pub eta_div: f64,
    pub space_charge_current_a: f64,
    pub current_density_limit_a_m2: f64,
    pub perveance_margin: f64,
    pub regime: SpaceChargeRegime,
}

impl IonPerformance {
    /// Axial thrust over ideal thrust.
    pub fn thrust_efficiency(&self) -> f64 {
        self.thrust_n / self.ideal_thrust_n
    }

    pub fn is_space_charge_limited(&self) -> bool {
        self.regime == SpaceChargeRegime::SpaceChargeLimited
    }

    /// Thrust-to-power ratio in mN/kW.
    pub fn thrust_to_power_mn_kw(&self) -> f64 {
        n_to_mn(self.thrust_n) / w_to_kw(self.power_w)
    }
}

/// Evaluate an ion engine at `(accel_voltage_v, beam_current_a)` for a gas of
/// relative mass `gas_mass_amu`.
pub fn evaluate(
    constants: &PhysicalConstants,
    gas: &str,
    gas_mass_amu: f64,
    config: &IonEngineConfig,
    accel_voltage_v: f64,
    beam_current_a: f64,
) -> Result<IonPerformance, PerformanceError> {
    let va = positive("accel_voltage_v", accel_voltage_v)?;
    let ib = positive("beam_current_a", beam_current_a)?;
    let q = constants.q;
    let m_i = gas_mass_amu * constants.amu;

    let v_e0 = (2.0 * q * va / m_i).sqrt();
    let ideal_thrust = ib * (2.0 * m_i * va / q).sqrt();

    let limit =
        space_charge::child_langmuir_limit(va, m_i, q, config.open_area_m2(), config.grid_gap_m)?;
    let tau_imp = space_charge::impingement_factor(ib, limit.current_a);
    let margin = space_charge::perveance_margin(ib, limit.current_a);

    let eta_div = config.divergence.efficiency();
    let transmission = config.tau_geom * config.tau_trans * tau_imp;
    let effective_current = ib * transmission;

    Ok(IonPerformance {
        gas: gas.to_string(),
        accel_voltage_v: va,
        beam_current_a: ib,
        effective_beam_current_a: effective_current,
        exhaust_velocity_m_s: v_e0,
        ideal_thrust_n: ideal_thrust,
        thrust_n: ideal_thrust * transmission * eta_div,
        isp_s: v_e0 / constants.g0 * transmission * eta_div,
        power_w: va * ib,
        mass_flow_kg_s: effective_current * m_i / q,
        tau_geom: config.tau_geom,
        tau_trans: config.tau_trans,
        tau_imp,
        eta_div,
        space_charge_current_a: limit.current_a,
        current_density_limit_a_m2: limit.current_density_a_m2,
        perveance_margin: margin,
        regime: SpaceChargeRegime::from_margin(margin),
    })
}
