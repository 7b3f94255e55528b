//! Sweep axes with fixed spacing schemes.

use serde::Serialize;

use crate::SweepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    Linear,
    Logarithmic,
}

/// Inclusive range sampled with `steps` points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepAxis {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub steps: usize,
    pub spacing: Spacing,
}

impl SweepAxis {
    /// Evenly spaced axis.
    pub fn linear(name: &'static str, min: f64, max: f64, steps: usize) -> Result<Self, SweepError> {
        Self::build(name, min, max, steps, Spacing::Linear)
    }

    /// Axis evenly spaced in `log10`; both bounds must be positive.
    pub fn logarithmic(
        name: &'static str,
        min: f64,
        max: f64,
        steps: usize,
    ) -> Result<Self, SweepError> {
        if min <= 0.0 {
            return Err(SweepError::InvalidAxis {
                axis: name,
                reason: "logarithmic axis requires a positive minimum",
            });
        }
        Self::build(name, min, max, steps, Spacing::Logarithmic)
    }

    fn build(
        name: &'static str,
        min: f64,
        max: f64,
        steps: usize,
        spacing: Spacing,
    ) -> Result<Self, SweepError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(SweepError::InvalidAxis {
                axis: name,
                reason: "bounds must be finite",
            });
        }
        if min > max {
            return Err(SweepError::InvalidAxis {
                axis: name,
                reason: "minimum exceeds maximum",
            });
        }
        if steps == 0 {
            return Err(SweepError::InvalidAxis {
                axis: name,
                reason: "at least one step is required",
            });
        }
        Ok(Self {
            name,
            min,
            max,
            steps,
            spacing,
        })
    }

    pub fn values(&self) -> Vec<f64> {
        match self.spacing {
            Spacing::Linear => linspace(self.min, self.max, self.steps),
            Spacing::Logarithmic => logspace(self.min, self.max, self.steps),
        }
    }
}

/// `steps` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (steps - 1) as f64;
            let mut values: Vec<f64> = (0..steps).map(|i| start + delta * i as f64).collect();
            values[steps - 1] = stop;
            values
        }
    }
}

/// `steps` values from `start` to `stop` evenly spaced in `log10`, both included.
/// Bounds must be positive.
pub fn logspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    let mut values: Vec<f64> = linspace(start.log10(), stop.log10(), steps)
        .into_iter()
        .map(|exponent| 10f64.powf(exponent))
        .collect();
    if let Some(first) = values.first_mut() {
        *first = start;
    }
    if steps > 1 {
        values[steps - 1] = stop;
    }
    values
}
