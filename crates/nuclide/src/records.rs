//! Validated entities of the reference data

// external crates
use serde::Serialize;

// gtools modules
use gtools_support::{f, FloatExt};

// internal modules
use crate::id::NuclideId;
use crate::mode::DecayMode;

/// Nuclide properties
///
/// Records only exist inside a [NuclideDatabase](crate::NuclideDatabase) and
/// are therefore always valid. Stable nuclides carry an infinite half-life.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nuclide {
    /// Canonical identifier e.g. 'Ra-226'
    pub id: NuclideId,
    /// Atomic number
    pub z: u16,
    /// Mass number
    pub a: u16,
    /// Half-life (s), infinite for stable nuclides
    pub half_life: f64,
}

impl Nuclide {
    /// Check for an effectively infinite half-life
    pub fn is_stable(&self) -> bool {
        self.half_life.is_infinite()
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Nuclide\n".to_string();
        s += &f!("  Identifier       {}\n", self.id);
        s += &f!("  Atomic number    {}\n", self.z);
        s += &f!("  Mass number      {}\n", self.a);
        s += &f!("  Half life        {} s", self.half_life.sci(4, 2));
        write!(f, "{s}")
    }
}

/// A single branch of the decay graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayEdge {
    /// Decaying nuclide
    pub parent: NuclideId,
    /// Product of this branch
    pub daughter: NuclideId,
    /// Decay mechanism of this branch
    pub mode: DecayMode,
    /// Branching ratio as a fraction in (0,1]
    pub ratio: f64,
}

impl std::fmt::Display for DecayEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({}, {:.4e})",
            self.parent, self.daughter, self.mode, self.ratio
        )
    }
}

/// Gamma emission line of a nuclide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GammaTransition {
    /// Owning nuclide
    pub nuclide: NuclideId,
    /// Line energy (keV)
    pub energy: f64,
    /// Relative intensity (% per decay)
    pub intensity: f64,
}

/// Characteristic X-ray line of an element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XrayLine {
    /// Element symbol e.g. 'Pb'
    pub element: String,
    /// Line energy (keV)
    pub energy: f64,
    /// Shell transition e.g. 'Ka1', 'Kb1'
    pub shell: String,
}

impl std::fmt::Display for XrayLine {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:>10.3} keV  {:<3} {}", self.energy, self.element, self.shell)
    }
}
