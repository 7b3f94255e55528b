//! Propellant gas catalog.

use crate::error::{PerformanceError, positive};

/// Mapping from gas name to relative atomic (or molecular) mass.
///
/// Entries keep insertion order; lookups ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GasCatalog {
    entries: Vec<(String, f64)>,
}

impl GasCatalog {
    /// Build a catalog, rejecting non-positive masses.
    /// A later entry with the same (case-insensitive) name replaces the earlier one.
    pub fn new<I, S>(entries: I) -> Result<Self, PerformanceError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for (name, mass) in entries {
            catalog.insert(name.into(), mass)?;
        }
        Ok(catalog)
    }

    /// Xenon, krypton and argon with standard atomic weights.
    pub fn noble_gases() -> Self {
        Self {
            entries: vec![
                ("Xenon".to_string(), 131.293),
                ("Krypton".to_string(), 83.798),
                ("Argon".to_string(), 39.948),
            ],
        }
    }

    fn insert(&mut self, name: String, mass: f64) -> Result<(), PerformanceError> {
        positive("gas_mass_amu", mass)?;
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = mass,
            None => self.entries.push((name, mass)),
        }
        Ok(())
    }

    /// Canonical name and relative mass for `gas`.
    pub fn lookup(&self, gas: &str) -> Result<(&str, f64), PerformanceError> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(gas.trim()))
            .map(|(name, mass)| (name.as_str(), *mass))
            .ok_or_else(|| PerformanceError::UnknownGas(gas.to_string()))
    }

    pub fn contains(&self, gas: &str) -> bool {
        self.lookup(gas).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
