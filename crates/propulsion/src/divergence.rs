//! Beam/plume divergence losses.
//!
//! A diverging exhaust only contributes its axial momentum component. The
//! models below map an angular spread to the retained fraction of axial thrust.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PerformanceError;

/// Closed set of divergence models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceModel {
    /// `cos θ` with θ the RMS half-angle. Only meaningful below 90°.
    Cosine,
    /// `exp(-σ²/2)` with σ the angular standard deviation.
    Gaussian,
}

impl DivergenceModel {
    pub fn as_str(self) -> &'static str {
        match self {
            DivergenceModel::Cosine => "cos",
            DivergenceModel::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for DivergenceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DivergenceModel {
    type Err = PerformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cos" | "cosine" => Ok(DivergenceModel::Cosine),
            "gaussian" | "gauss" => Ok(DivergenceModel::Gaussian),
            _ => Err(PerformanceError::UnrecognizedModel(s.to_string())),
        }
    }
}

/// Axial efficiency for `model` at `angle_deg`.
///
/// Zero degrees yields exactly `1.0`. Angles must be finite and non-negative,
/// and a configuration whose efficiency is not strictly positive (the cosine
/// model at or past 90°) is rejected instead of producing negative thrust.
pub fn efficiency(model: DivergenceModel, angle_deg: f64) -> Result<f64, PerformanceError> {
    if !angle_deg.is_finite() || angle_deg < 0.0 {
        return Err(PerformanceError::invalid(
            "divergence_angle_deg",
            angle_deg,
            "must be finite and non-negative",
        ));
    }
    if angle_deg == 0.0 {
        return Ok(1.0);
    }

    let theta = angle_deg.to_radians();
    let eta = match model {
        DivergenceModel::Cosine => {
            // cos(π/2) rounds to ~6e-17, so the half-plane is checked on the angle itself.
            if angle_deg >= 90.0 {
                return Err(PerformanceError::invalid(
                    "divergence_angle_deg",
                    angle_deg,
                    "cosine divergence requires a half-angle below 90 degrees",
                ));
            }
            theta.cos()
        }
        DivergenceModel::Gaussian => (-theta * theta / 2.0).exp(),
    };

    if eta > 0.0 {
        Ok(eta)
    } else {
        Err(PerformanceError::invalid(
            "divergence_angle_deg",
            angle_deg,
            "divergence efficiency must be positive",
        ))
    }
}

/// Validated divergence description carried by an engine configuration.
///
/// Fields are private so the cached efficiency always matches the angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Divergence {
    model: DivergenceModel,
    angle_deg: f64,
    /// Cached axial efficiency for `angle_deg`.
    efficiency: f64,
}

impl Divergence {
    /// Validate the angle for `model` once, up front.
    pub fn new(model: DivergenceModel, angle_deg: f64) -> Result<Self, PerformanceError> {
        let efficiency = efficiency(model, angle_deg)?;
        Ok(Self {
            model,
            angle_deg,
            efficiency,
        })
    }

    /// Parse the model name and validate the angle.
    pub fn parse(model: &str, angle_deg: f64) -> Result<Self, PerformanceError> {
        Self::new(model.parse()?, angle_deg)
    }

    /// No divergence loss.
    pub fn none() -> Self {
        Self {
            model: DivergenceModel::Cosine,
            angle_deg: 0.0,
            efficiency: 1.0,
        }
    }

    pub fn model(&self) -> DivergenceModel {
        self.model
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}
