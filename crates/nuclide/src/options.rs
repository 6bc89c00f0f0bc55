//! Query configuration

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// external crates
use serde::{Deserialize, Serialize};

// internal modules
use crate::error::{Error, Result};

/// Minimum cumulative branching ratio ever followed through a decay chain
///
/// A `branching_ratio_threshold` of zero means "everything reachable", which
/// is raised to this floor so that traversal of deep or malformed decay data
/// always terminates. Branches pruned by the floor are counted in
/// [DecayChain::floor_pruned](crate::DecayChain::floor_pruned) and logged.
pub const BRANCHING_RATIO_FLOOR: f64 = 1e-12;

/// Maximum number of decay steps followed from a root nuclide
///
/// The longest natural series is well under 20 steps.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Options recognised by every query
///
/// | Option                      | Default | Effect                                                 |
/// | --------------------------- | ------- | ------------------------------------------------------ |
/// | `delta`                     | 2.0     | Half width (keV) of an energy search window            |
/// | `halflife_threshold`        | 0.0     | Minimum half-life (s) of a matching emitter            |
/// | `intensity_threshold`       | 0.0     | Minimum intensity (%) of a matching line               |
/// | `limit_intensity`           | false   | Keep only lines within 10% of a nuclide's strongest   |
/// | `branching_ratio_threshold` | 0.0     | Minimum cumulative branching ratio of a chain member   |
///
/// Each query validates the options it uses before doing any work, failing
/// with [Error::InvalidArgument] otherwise.
///
/// ```rust
/// # use gtools_nuclide::QueryOptions;
/// let options = QueryOptions::default()
///     .with_delta(1.0)
///     .with_halflife_threshold(60.0)
///     .with_intensity_threshold(1.0);
///
/// assert!(options.check_energy_window().is_ok());
/// assert!(QueryOptions::default().with_delta(0.0).check_energy_window().is_err());
/// ```
///
/// Options may also be read from a JSON file, where any missing field takes its
/// default value.
///
/// ```json
/// { "delta": 1.0, "limit_intensity": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryOptions {
    /// Half width of an energy search window (keV)
    pub delta: f64,
    /// Minimum half-life of a matching emitter (s)
    pub halflife_threshold: f64,
    /// Minimum intensity of a matching line (%)
    pub intensity_threshold: f64,
    /// Keep only lines within 10% of each nuclide's strongest line
    pub limit_intensity: bool,
    /// Minimum cumulative branching ratio of a chain member
    pub branching_ratio_threshold: f64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            delta: 2.0,
            halflife_threshold: 0.0,
            intensity_threshold: 0.0,
            limit_intensity: false,
            branching_ratio_threshold: 0.0,
        }
    }
}

impl QueryOptions {
    /// Read options from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Set the search window half width (keV)
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Set the minimum emitter half-life (s)
    pub fn with_halflife_threshold(mut self, threshold: f64) -> Self {
        self.halflife_threshold = threshold;
        self
    }

    /// Set the minimum line intensity (%)
    pub fn with_intensity_threshold(mut self, threshold: f64) -> Self {
        self.intensity_threshold = threshold;
        self
    }

    /// Toggle the per-nuclide 10% intensity cut
    pub fn with_limit_intensity(mut self, limit: bool) -> Self {
        self.limit_intensity = limit;
        self
    }

    /// Set the minimum cumulative branching ratio
    pub fn with_branching_ratio_threshold(mut self, threshold: f64) -> Self {
        self.branching_ratio_threshold = threshold;
        self
    }

    /// Validate the options used by an energy search
    pub fn check_energy_window(&self) -> Result<()> {
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(invalid("delta", self.delta, "must be finite and > 0"));
        }
        non_negative("halflife_threshold", self.halflife_threshold)?;
        non_negative("intensity_threshold", self.intensity_threshold)
    }

    /// Validate the options used by a line listing
    pub fn check_line_filter(&self) -> Result<()> {
        non_negative("intensity_threshold", self.intensity_threshold)
    }

    /// Validate the options used by chain resolution
    pub fn check_branching(&self) -> Result<()> {
        let ratio = self.branching_ratio_threshold;
        match (0.0..=1.0).contains(&ratio) {
            true => Ok(()),
            false => Err(invalid("branching_ratio_threshold", ratio, "must be in [0,1]")),
        }
    }
}

/// Validate a query energy
pub(crate) fn check_energy(name: &'static str, energy: f64) -> Result<()> {
    match energy.is_finite() {
        true => Ok(()),
        false => Err(invalid(name, energy, "must be finite")),
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    // also catches NaN
    match value >= 0.0 {
        true => Ok(()),
        false => Err(invalid(name, value, "must be >= 0")),
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> Error {
    Error::InvalidArgument {
        name,
        value,
        reason,
    }
}
