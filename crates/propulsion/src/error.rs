use thiserror::Error;

/// Failures raised by the performance models. All of them are precondition
/// violations: the calculation is aborted and no partial result exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error("invalid physical parameter `{name}` = {value}: {reason}")]
    InvalidPhysicalParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("gas '{0}' not found in catalog")]
    UnknownGas(String),
    #[error("unrecognized divergence model '{0}'")]
    UnrecognizedModel(String),
}

impl PerformanceError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidPhysicalParameter {
            name,
            value,
            reason,
        }
    }
}

/// Require a finite, strictly positive value.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, PerformanceError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PerformanceError::invalid(
            name,
            value,
            "must be finite and greater than zero",
        ))
    }
}

/// Require an efficiency-like factor in (0, 1].
pub(crate) fn fraction(name: &'static str, value: f64) -> Result<f64, PerformanceError> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(PerformanceError::invalid(name, value, "must lie in (0, 1]"))
    }
}
