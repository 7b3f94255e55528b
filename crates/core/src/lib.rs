//! Core units, constants, and shared primitives for the Thruster Lab workspace.

/// Physical constants expressed in SI units.
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Elementary charge (C), exact since the 2019 SI redefinition.
    pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
    /// Unified atomic mass unit (kg), CODATA 2018.
    pub const AMU: f64 = 1.660_539_066_60e-27;
    /// Vacuum permittivity (F/m), CODATA 2018.
    pub const EPSILON_0: f64 = 8.854_187_812_8e-12;
}

/// Basic unit conversion helpers for the presentation layer.
pub mod units {
    /// Convert newtons to millinewtons.
    #[inline]
    pub fn n_to_mn(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert kilograms per second to milligrams per second.
    #[inline]
    pub fn kg_s_to_mg_s(v: f64) -> f64 {
        v * 1.0e6
    }

    /// Convert milligrams per second to kilograms per second.
    #[inline]
    pub fn mg_s_to_kg_s(v: f64) -> f64 {
        v * 1.0e-6
    }

    /// Convert watts to kilowatts.
    #[inline]
    pub fn w_to_kw(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Physical constants record threaded through the performance models.
///
/// The defaults are the SI values in [`constants`]; a configuration file may
/// override them, in which case [`PhysicalConstants::new`] checks positivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Elementary charge (C).
    pub q: f64,
    /// Atomic mass unit (kg).
    pub amu: f64,
    /// Standard gravity (m/s²).
    pub g0: f64,
}

impl PhysicalConstants {
    /// Build a constants record, rejecting non-positive or non-finite values.
    ///
    /// On failure the name of the offending constant is returned.
    pub fn new(q: f64, amu: f64, g0: f64) -> Result<Self, &'static str> {
        for (name, value) in [("q", q), ("amu", amu), ("g0", g0)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(name);
            }
        }
        Ok(Self { q, amu, g0 })
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            q: constants::ELEMENTARY_CHARGE,
            amu: constants::AMU,
            g0: constants::G0,
        }
    }
}
