//! Conversion of a loaded [`LabConfig`] into validated, typed sweeps.

use thiserror::Error;
use thruster_config::LabConfig;
use thruster_core::PhysicalConstants;
use thruster_propulsion::{
    Divergence, GasCatalog, HallThrusterConfig, IonEngineConfig, PerformanceError,
    PropulsionCalculator,
};

use crate::{HallSweep, IonSweep, SweepError};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid constant `{0}`: must be finite and greater than zero")]
    InvalidConstant(&'static str),
    #[error("invalid {section} configuration: {source}")]
    Engine {
        section: &'static str,
        #[source]
        source: PerformanceError,
    },
    #[error("invalid {section} sweep: {source}")]
    Sweep {
        section: &'static str,
        #[source]
        source: SweepError,
    },
}

/// Calculator plus both sweeps, built once from configuration.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub calculator: PropulsionCalculator,
    pub ion: IonSweep,
    pub hall: HallSweep,
}

impl SweepPlan {
    /// Validate `config`. `gas_override` replaces the configured gas list.
    ///
    /// Every swept gas must be present in the gas catalog.
    pub fn from_config(config: &LabConfig, gas_override: Option<&[String]>) -> Result<Self, PlanError> {
        let calculator = calculator_from_config(config)?;

        let gases: &[String] = gas_override.unwrap_or(&config.gases);
        if let Some(missing) = gases.iter().find(|gas| !calculator.gases().contains(gas)) {
            return Err(PlanError::Engine {
                section: "gases",
                source: PerformanceError::UnknownGas(missing.clone()),
            });
        }

        let ion_cfg = &config.ion_engine;
        let ion_engine = Divergence::parse(ion_cfg.divergence_model(), ion_cfg.divergence_angle_deg())
            .and_then(|divergence| {
                IonEngineConfig::new(
                    ion_cfg.geometry.grid_area_m2,
                    ion_cfg.geometry.grid_gap_m,
                    ion_cfg.geometry.tau_geom,
                    ion_cfg.losses.tau_trans,
                    divergence,
                )
            })
            .map_err(|source| PlanError::Engine {
                section: "ion_engine",
                source,
            })?;
        let ion = IonSweep::new(
            gases,
            (ion_cfg.voltage_range_v[0], ion_cfg.voltage_range_v[1]),
            ion_cfg.voltage_steps,
            (ion_cfg.current_range_a[0], ion_cfg.current_range_a[1]),
            ion_cfg.current_steps,
            ion_engine,
        )
        .map_err(|source| PlanError::Sweep {
            section: "ion_engine",
            source,
        })?;

        let hall_cfg = &config.hall_thruster;
        let hall_engine =
            Divergence::parse(hall_cfg.divergence_model(), hall_cfg.divergence_angle_deg())
                .and_then(|divergence| {
                    HallThrusterConfig::new(hall_cfg.eta_acc, hall_cfg.tau_prop, divergence)
                })
                .map_err(|source| PlanError::Engine {
                    section: "hall_thruster",
                    source,
                })?;
        let hall = HallSweep::new(
            gases,
            (hall_cfg.voltage_range_v[0], hall_cfg.voltage_range_v[1]),
            hall_cfg.voltage_steps,
            (
                hall_cfg.mass_flow_range_kg_s[0],
                hall_cfg.mass_flow_range_kg_s[1],
            ),
            hall_cfg.mass_flow_steps,
            hall_engine,
        )
        .map_err(|source| PlanError::Sweep {
            section: "hall_thruster",
            source,
        })?;

        Ok(Self {
            calculator,
            ion,
            hall,
        })
    }
}

/// Calculator built from the configured constants and gas masses.
pub fn calculator_from_config(config: &LabConfig) -> Result<PropulsionCalculator, PlanError> {
    let constants =
        PhysicalConstants::new(config.constants.q, config.constants.amu, config.constants.g0)
            .map_err(PlanError::InvalidConstant)?;
    let catalog = GasCatalog::new(
        config
            .gas_masses
            .iter()
            .map(|(name, mass)| (name.clone(), *mass)),
    )
    .map_err(|source| PlanError::Engine {
        section: "gas_masses",
        source,
    })?;
    Ok(PropulsionCalculator::new(constants, catalog))
}
