//! Child-Langmuir space-charge limit for grid-extracted ion beams.

use serde::Serialize;
use thruster_core::constants::EPSILON_0;

use crate::error::{PerformanceError, positive};

/// Space-charge ceiling across an accelerating gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChildLangmuirLimit {
    /// Maximum extractable current through the open area (A).
    pub current_a: f64,
    /// Maximum current density (A/m²).
    pub current_density_a_m2: f64,
}

/// Whether the requested beam current fits under the space-charge ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceChargeRegime {
    Unconstrained,
    SpaceChargeLimited,
}

impl SpaceChargeRegime {
    pub fn from_margin(perveance_margin: f64) -> Self {
        if perveance_margin < 1.0 {
            SpaceChargeRegime::SpaceChargeLimited
        } else {
            SpaceChargeRegime::Unconstrained
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpaceChargeRegime::Unconstrained => "unconstrained",
            SpaceChargeRegime::SpaceChargeLimited => "space_charge_limited",
        }
    }
}

/// Child-Langmuir law:
///
/// `J_CL = (4/9) ε₀ sqrt(2 q / m_i) V^1.5 / d²` and `I_CL = J_CL · A_open`.
pub fn child_langmuir_limit(
    voltage_v: f64,
    ion_mass_kg: f64,
    charge_c: f64,
    open_area_m2: f64,
    gap_m: f64,
) -> Result<ChildLangmuirLimit, PerformanceError> {
    positive("accel_voltage_v", voltage_v)?;
    positive("ion_mass_kg", ion_mass_kg)?;
    positive("charge_c", charge_c)?;
    positive("open_area_m2", open_area_m2)?;
    positive("grid_gap_m", gap_m)?;

    let current_density =
        (4.0 / 9.0) * EPSILON_0 * (2.0 * charge_c / ion_mass_kg).sqrt() * voltage_v.powf(1.5)
            / (gap_m * gap_m);
    Ok(ChildLangmuirLimit {
        current_a: current_density * open_area_m2,
        current_density_a_m2: current_density,
    })
}

/// Derating applied to the requested current: `1.0` while under the limit,
/// `I_CL / I_requested` once the beam is space-charge limited.
pub fn impingement_factor(requested_a: f64, limit_a: f64) -> f64 {
    if requested_a <= limit_a {
        1.0
    } else {
        limit_a / requested_a
    }
}

/// Ratio of the space-charge current to the requested current. Below `1.0`
/// the engine is space-charge limited.
pub fn perveance_margin(requested_a: f64, limit_a: f64) -> f64 {
    limit_a / requested_a
}
