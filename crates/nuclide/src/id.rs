//! Nuclide identifiers

// standard library
use std::str::FromStr;

// external crates
use serde::{Deserialize, Serialize};

// gtools modules
use gtools_support::f;

// internal modules
use crate::error::{Error, Result};
use crate::parsers::nuclide_id;

/// Identifier for a particular nuclide
///
/// The `FromStr` trait is implemented and will try to parse a string into a
/// nuclide identifier. Expects `<element><separator><mass><state>`, e.g.
///
/// - Ground states Ra-226, ra226, Ra_226
/// - Numbered isomers Ba137m1 Ba137m2
/// - FISPACT-II style isomers Ba137m Ba137n
///
/// Every spelling of the same nuclide compares equal and displays in the same
/// canonical `<Symbol>-<A><state>` form.
///
/// ```rust
/// # use gtools_nuclide::{NuclideId, IsomerState};
/// # use std::str::FromStr;
/// let id = NuclideId::from_str("ba137m1").unwrap();
///
/// assert_eq!(
///     id,
///     NuclideId {
///         symbol: "Ba".to_string(),
///         mass: 137,
///         state: IsomerState::Excited(1)
///     }
/// );
///
/// assert_eq!(id.to_string(), "Ba-137m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NuclideId {
    /// Element symbol e.g. 'Ra', 'Pb'
    pub symbol: String,
    /// Mass number (Z+N, total nucleons)
    pub mass: u16,
    /// Excited state status
    pub state: IsomerState,
}

impl NuclideId {
    /// Check if the nuclide is an excited isomer
    pub fn is_isomer(&self) -> bool {
        matches!(self.state, IsomerState::Excited(_))
    }

    /// Identifier of the ground state of the same nuclide
    ///
    /// ```rust
    /// # use gtools_nuclide::NuclideId;
    /// # use std::str::FromStr;
    /// let isomer = NuclideId::from_str("Ba-137m").unwrap();
    /// assert_eq!(isomer.ground().to_string(), "Ba-137");
    /// ```
    pub fn ground(&self) -> NuclideId {
        NuclideId {
            symbol: self.symbol.clone(),
            mass: self.mass,
            state: IsomerState::Ground,
        }
    }
}

impl FromStr for NuclideId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, id) = nuclide_id(s)
            .map_err(|_| Error::ParseError(f!("could not interpret \"{s}\" as a nuclide")))?;
        Ok(id)
    }
}

impl TryFrom<String> for NuclideId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_str(&s)
    }
}

impl From<NuclideId> for String {
    fn from(id: NuclideId) -> Self {
        id.to_string()
    }
}

impl std::fmt::Display for NuclideId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}{}", self.symbol, self.mass, self.state)
    }
}

/// Variants of excited states
///
/// A nuclide can either be in the ground state, or some excited state.
///
/// The first three excited states display with the FISPACT-II letters `m`,
/// `n` and `o`, anything higher falls back to the numbered `m4`, `m5`, ...
/// notation. Both notations are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum IsomerState {
    #[default]
    Ground,
    Excited(u8),
}

impl std::fmt::Display for IsomerState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let state = match self {
            IsomerState::Ground => String::new(),
            IsomerState::Excited(1) => "m".to_string(),
            IsomerState::Excited(2) => "n".to_string(),
            IsomerState::Excited(3) => "o".to_string(),
            IsomerState::Excited(e) => f!("m{e}"),
        };
        write!(f, "{state}")
    }
}
